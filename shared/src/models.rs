//! Account and subscription models shared by the backend and clients

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declares a string-backed enum with `as_str`, `Display` and `FromStr`
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(format!("Unknown {}: {}", stringify!($name), s)),
                }
            }
        }
    };
}

string_enum! {
    /// Account role
    Role { User => "user", Admin => "admin" }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

string_enum! {
    /// Subscription tier
    SubscriptionPlanType { Basic => "basic", Premium => "premium", Pro => "pro" }
}

string_enum! {
    SubscriptionStatus {
        Active => "active",
        Expired => "expired",
        Cancelled => "cancelled",
        Pending => "pending",
    }
}

string_enum! {
    PaymentStatus {
        Pending => "pending",
        Completed => "completed",
        Failed => "failed",
        Refunded => "refunded",
    }
}

string_enum! {
    PaymentMethod {
        CreditCard => "credit_card",
        DebitCard => "debit_card",
        Paypal => "paypal",
        BankTransfer => "bank_transfer",
    }
}

/// Longest subscription period an account can hold
pub const MAX_SUBSCRIPTION_DAYS: i32 = 3650;

/// End of a subscription that starts at `start` and lasts `duration_days`
///
/// `None` when the end falls outside the representable date range.
pub fn subscription_end_date(
    start: DateTime<Utc>,
    duration_days: i32,
) -> Option<DateTime<Utc>> {
    start.checked_add_signed(Duration::days(i64::from(duration_days)))
}

/// Default offering for a subscription tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanOffering {
    pub plan_type: SubscriptionPlanType,
    pub plan_name: &'static str,
    pub price: f64,
    pub duration_days: i32,
    pub features: &'static [&'static str],
}

impl SubscriptionPlanType {
    /// Standard monthly offering for this tier
    pub fn offering(&self) -> PlanOffering {
        match self {
            SubscriptionPlanType::Basic => PlanOffering {
                plan_type: *self,
                plan_name: "Basic Monthly",
                price: 29.99,
                duration_days: 30,
                features: &["Gym access", "Personalized workout plan"],
            },
            SubscriptionPlanType::Premium => PlanOffering {
                plan_type: *self,
                plan_name: "Premium Monthly",
                price: 49.99,
                duration_days: 30,
                features: &[
                    "Gym access",
                    "Personalized workout plan",
                    "Personalized diet plan",
                ],
            },
            SubscriptionPlanType::Pro => PlanOffering {
                plan_type: *self,
                plan_name: "Pro Monthly",
                price: 79.99,
                duration_days: 30,
                features: &[
                    "Gym access",
                    "Personalized workout plan",
                    "Personalized diet plan",
                    "Personal trainer sessions",
                ],
            },
        }
    }
}
