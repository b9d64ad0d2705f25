// tests/common/mod.rs
//! Target types shared by the integration tests
//!
//! Fields are private to this module, so tests can only reach them through
//! the accessor.

#![allow(dead_code)]

use member_accessor::{AccessError, Args, Arity, Class, DynamicProperties, Members, Value, Visibility};
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
#[error("insufficient funds: balance {balance}, requested {requested}")]
pub struct InsufficientFunds {
    pub balance: i64,
    pub requested: i64,
}

/// Everything hidden behind private members
pub struct Account {
    secret: i64,
    counter: i64,
    balance: i64,
    owner: Option<String>,
    payload: Value,
}

impl Account {
    pub fn new() -> Self {
        Self {
            secret: 42,
            counter: 0,
            balance: 100,
            owner: None,
            payload: Value::Null,
        }
    }

    pub fn counter(&self) -> i64 {
        self.counter
    }

    fn increment(&mut self) -> i64 {
        self.counter += 1;
        self.counter
    }

    fn withdraw(&mut self, amount: i64) -> Result<i64, InsufficientFunds> {
        if amount > self.balance {
            return Err(InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance -= amount;
        Ok(self.balance)
    }
}

impl Members for Account {
    fn class() -> &'static Class<Self> {
        static CLASS: OnceLock<Class<Account>> = OnceLock::new();
        CLASS.get_or_init(|| {
            Class::<Self>::new("Account")
                .field("secret", Visibility::Private, |a| &a.secret, |a| &mut a.secret)
                .field("counter", Visibility::Private, |a| &a.counter, |a| &mut a.counter)
                .field("balance", Visibility::Protected, |a| &a.balance, |a| &mut a.balance)
                .field("owner", Visibility::Private, |a| &a.owner, |a| &mut a.owner)
                .field("payload", Visibility::Private, |a| &a.payload, |a| &mut a.payload)
                .property(
                    "summary",
                    Visibility::Private,
                    |a: &Account| Value::from(format!("{}:{}", a.balance, a.counter)),
                    |_: &mut Account, _: Value| Err(AccessError::raised("summary is read-only")),
                )
                .method0("greet", Visibility::Private, |_| Ok(Value::from("hi")))
                .method2("add", Visibility::Private, |_, a: i64, b: i64| Ok(Value::Int(a + b)))
                .method0("increment", Visibility::Private, |a| Ok(Value::Int(a.increment())))
                .method1("withdraw", Visibility::Private, |a, amount: i64| {
                    a.withdraw(amount).map(Value::Int).map_err(AccessError::raised)
                })
                .method(
                    "rename",
                    Visibility::Protected,
                    Arity::Between(0, 1),
                    |a, mut args: Args| {
                        a.owner = args.take_optional::<String>()?;
                        Ok(Value::from(a.owner.clone()))
                    },
                )
        })
    }
}

/// Base class of [`Dog`]
pub struct Animal {
    name: String,
    legs: i64,
    dna: String,
}

impl Animal {
    pub fn new(name: &str, legs: i64) -> Self {
        Self {
            name: name.to_string(),
            legs,
            dna: "ACGT".to_string(),
        }
    }

    fn describe(&self) -> String {
        format!("{} has {} legs", self.name, self.legs)
    }
}

impl Members for Animal {
    fn class() -> &'static Class<Self> {
        static CLASS: OnceLock<Class<Animal>> = OnceLock::new();
        CLASS.get_or_init(|| {
            Class::<Self>::new("Animal")
                .field("name", Visibility::Protected, |a| &a.name, |a| &mut a.name)
                .field("legs", Visibility::Public, |a| &a.legs, |a| &mut a.legs)
                .field("dna", Visibility::Private, |a| &a.dna, |a| &mut a.dna)
                .method0("describe", Visibility::Protected, |a| Ok(Value::from(a.describe())))
                .method0("speak", Visibility::Public, |_| Ok(Value::from("...")))
                .method0("digest", Visibility::Private, |_| Ok(Value::from("digesting")))
        })
    }
}

/// Derived class embedding an [`Animal`]
pub struct Dog {
    animal: Animal,
    tricks: i64,
}

impl Dog {
    pub fn new(name: &str) -> Self {
        Self {
            animal: Animal::new(name, 4),
            tricks: 0,
        }
    }

    pub fn animal_name(&self) -> &str {
        &self.animal.name
    }
}

impl Members for Dog {
    fn class() -> &'static Class<Self> {
        static CLASS: OnceLock<Class<Dog>> = OnceLock::new();
        CLASS.get_or_init(|| {
            Class::<Self>::new("Dog")
                .extends(|d| &d.animal, |d| &mut d.animal)
                .field("tricks", Visibility::Private, |d| &d.tricks, |d| &mut d.tricks)
                .method0("speak", Visibility::Public, |_| Ok(Value::from("woof")))
                .method1("learn", Visibility::Private, |d, count: i64| {
                    d.tricks += count;
                    Ok(Value::Int(d.tricks))
                })
        })
    }
}

/// Two levels below [`Animal`]
pub struct Puppy {
    dog: Dog,
    age: i64,
}

impl Puppy {
    pub fn new(name: &str) -> Self {
        Self {
            dog: Dog::new(name),
            age: 1,
        }
    }

    pub fn animal_name(&self) -> &str {
        self.dog.animal_name()
    }
}

impl Members for Puppy {
    fn class() -> &'static Class<Self> {
        static CLASS: OnceLock<Class<Puppy>> = OnceLock::new();
        CLASS.get_or_init(|| {
            Class::<Self>::new("Puppy")
                .extends(|p| &p.dog, |p| &mut p.dog)
                .field("age", Visibility::Private, |p| &p.age, |p| &mut p.age)
        })
    }
}

/// Accepts properties attached at runtime
pub struct Bag {
    label: String,
    extra: DynamicProperties,
}

impl Bag {
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            extra: DynamicProperties::new(),
        }
    }

    pub fn extra(&self) -> &DynamicProperties {
        &self.extra
    }
}

impl Members for Bag {
    fn class() -> &'static Class<Self> {
        static CLASS: OnceLock<Class<Bag>> = OnceLock::new();
        CLASS.get_or_init(|| {
            Class::<Self>::new("Bag")
                .field("label", Visibility::Private, |b| &b.label, |b| &mut b.label)
                .dynamic(|b| &b.extra, |b| &mut b.extra)
        })
    }
}

/// Inherits dynamic storage from [`Bag`]
pub struct TaggedBag {
    bag: Bag,
    tag: String,
}

impl TaggedBag {
    pub fn new(tag: &str) -> Self {
        Self {
            bag: Bag::new("tagged"),
            tag: tag.to_string(),
        }
    }

    pub fn bag(&self) -> &Bag {
        &self.bag
    }
}

impl Members for TaggedBag {
    fn class() -> &'static Class<Self> {
        static CLASS: OnceLock<Class<TaggedBag>> = OnceLock::new();
        CLASS.get_or_init(|| {
            Class::<Self>::new("TaggedBag")
                .extends(|t| &t.bag, |t| &mut t.bag)
                .field("tag", Visibility::Private, |t| &t.tag, |t| &mut t.tag)
        })
    }
}

/// Same arithmetic registered through every arity helper and the generic path
pub struct Calculator {
    calls: i64,
}

impl Calculator {
    pub fn new() -> Self {
        Self { calls: 0 }
    }

    pub fn calls(&self) -> i64 {
        self.calls
    }

    fn record(&mut self, total: i64) -> Result<Value, AccessError> {
        self.calls += 1;
        Ok(Value::Int(total))
    }
}

impl Members for Calculator {
    fn class() -> &'static Class<Self> {
        static CLASS: OnceLock<Class<Calculator>> = OnceLock::new();
        CLASS.get_or_init(|| {
            Class::<Self>::new("Calculator")
                .method0("sum0", Visibility::Private, |c| c.record(0))
                .method1("sum1", Visibility::Private, |c, a: i64| c.record(a))
                .method2("sum2", Visibility::Private, |c, a: i64, b: i64| c.record(a + b))
                .method3("sum3", Visibility::Private, |c, a: i64, b: i64, d: i64| {
                    c.record(a + b + d)
                })
                .method4("sum4", Visibility::Private, |c, a: i64, b: i64, d: i64, e: i64| {
                    c.record(a + b + d + e)
                })
                .method5(
                    "sum5",
                    Visibility::Private,
                    |c, a: i64, b: i64, d: i64, e: i64, f: i64| c.record(a + b + d + e + f),
                )
                .variadic("sum", Visibility::Private, 0, |c, mut args: Args| {
                    let mut total = 0;
                    while args.remaining() > 0 {
                        total += args.take::<i64>()?;
                    }
                    c.record(total)
                })
        })
    }
}

/// Registered method name for a fixed-arity sum of `n` arguments
pub fn fixed_sum_name(n: usize) -> &'static str {
    ["sum0", "sum1", "sum2", "sum3", "sum4", "sum5"][n]
}
