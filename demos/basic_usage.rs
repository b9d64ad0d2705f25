// demos/basic_usage.rs
//! Basic usage of the member accessor
//!
//! Run with `RUST_LOG=trace` to see how each member is resolved.

use member_accessor::{args, AccessError, Class, DynamicProperties, MemberAccessor, Members, Value, Visibility};
use std::sync::OnceLock;
use tracing_subscriber::EnvFilter;

mod model {
    use super::*;

    /// A user record with no public accessors at all
    pub struct User {
        id: i64,
        email: String,
        login_count: i64,
        extra: DynamicProperties,
    }

    impl User {
        pub fn new(id: i64, email: &str) -> Self {
            Self {
                id,
                email: email.to_string(),
                login_count: 0,
                extra: DynamicProperties::new(),
            }
        }

        fn record_login(&mut self) -> i64 {
            self.login_count += 1;
            self.login_count
        }

        fn masked_email(&self, keep: i64) -> String {
            let keep = keep.max(0) as usize;
            let visible: String = self.email.chars().take(keep).collect();
            format!("{}***", visible)
        }
    }

    impl Members for User {
        fn class() -> &'static Class<Self> {
            static CLASS: OnceLock<Class<User>> = OnceLock::new();
            CLASS.get_or_init(|| {
                Class::<Self>::new("User")
                    .field("id", Visibility::Private, |u| &u.id, |u| &mut u.id)
                    .field("email", Visibility::Private, |u| &u.email, |u| &mut u.email)
                    .field("login_count", Visibility::Private, |u| &u.login_count, |u| {
                        &mut u.login_count
                    })
                    .method0("record_login", Visibility::Private, |u| {
                        Ok(Value::Int(u.record_login()))
                    })
                    .method1("masked_email", Visibility::Private, |u, keep: i64| {
                        Ok(Value::from(u.masked_email(keep)))
                    })
                    .dynamic(|u| &u.extra, |u| &mut u.extra)
            })
        }
    }
}

fn main() -> Result<(), AccessError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Member Accessor - Basic Usage ===\n");

    let accessor = MemberAccessor::new();
    let mut user = model::User::new(7, "ada@example.com");

    // Read private fields
    let email = accessor.get_property_value(&user, "email")?;
    println!("email: {}", email);

    // Write a private field
    accessor.set_property_value(&mut user, "email", "grace@example.com")?;
    println!("email after write: {}", accessor.get_property_value(&user, "email")?);

    // Invoke private methods
    accessor.execute_method(&mut user, "record_login", args![])?;
    accessor.execute_method(&mut user, "record_login", args![])?;
    println!("login_count: {}", accessor.get_property_value(&user, "login_count")?);

    let masked = accessor.get_method_value(&mut user, "masked_email", args![3])?;
    println!("masked: {}", masked);

    // Attach a property at runtime
    accessor.set_property_value(&mut user, "nickname", "gh")?;
    println!("nickname: {}", accessor.get_property_value(&user, "nickname")?);

    // Failures come back as errors
    match accessor.get_method_value(&mut user, "masked_email", args!["three"]) {
        Err(err) => println!("expected failure: {}", err),
        Ok(value) => println!("unexpected success: {}", value),
    }

    Ok(())
}
