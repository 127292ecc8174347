use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::{amount::Amount, error::QiwiError};

const LIFETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Bill fields sent on creation. `extra` is merged into the body as is.
#[derive(Serialize, Debug, Clone, Default)]
pub struct BillFields {
    #[serde(skip)]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ccy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prv_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize)]
struct BillBody<'a> {
    #[serde(flatten)]
    fields: &'a BillFields,
    amount: String,
}

impl BillFields {
    pub fn new(amount: impl Into<Amount>, ccy: impl Into<String>) -> Self {
        BillFields {
            amount: Some(amount.into()),
            ccy: Some(ccy.into()),
            ..Default::default()
        }
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn lifetime(mut self, lifetime: impl Into<String>) -> Self {
        self.lifetime = Some(lifetime.into());
        self
    }

    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn pay_source(mut self, pay_source: impl Into<String>) -> Self {
        self.pay_source = Some(pay_source.into());
        self
    }

    pub fn prv_name(mut self, prv_name: impl Into<String>) -> Self {
        self.prv_name = Some(prv_name.into());
        self
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Request body with the amount normalized.
    pub(crate) fn to_body(&self) -> Result<Value, QiwiError> {
        let amount = crate::amount::normalize(self.amount.as_ref())?;
        let mut body = serde_json::to_value(BillBody {
            fields: self,
            amount: amount.clone(),
        })
        .map_err(QiwiError::Serialize)?;
        // an `amount` key in `extra` must not shadow the normalized one
        if let Some(object) = body.as_object_mut() {
            object.insert("amount".to_owned(), Value::String(amount));
        }
        Ok(body)
    }
}

/// Bill expiry `days` from now.
pub fn lifetime_by_days(days: i64) -> Result<String, QiwiError> {
    lifetime_by_days_from(Utc::now(), days)
}

pub fn lifetime_by_days_from(now: DateTime<Utc>, days: i64) -> Result<String, QiwiError> {
    let expires_at = TimeDelta::try_days(days)
        .and_then(|delta| now.checked_add_signed(delta))
        .ok_or(QiwiError::InvalidLifetime(days))?;
    Ok(expires_at.format(LIFETIME_FORMAT).to_string())
}

#[cfg(test)]
pub mod tests {
    use chrono::TimeZone as _;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_body() {
        let fields = BillFields::new(1.0, "RUB")
            .comment("test")
            .lifetime("2018-03-02T00:00:00")
            .user("tel:+79086666695");
        assert_eq!(
            json!({
                "amount": "1.00",
                "ccy": "RUB",
                "comment": "test",
                "lifetime": "2018-03-02T00:00:00",
                "user": "tel:+79086666695",
            }),
            fields.to_body().unwrap()
        );
    }

    #[test]
    fn test_body_without_amount() {
        let fields = BillFields {
            ccy: Some("RUB".to_owned()),
            ..Default::default()
        };
        assert_eq!(
            json!({"amount": "0.00", "ccy": "RUB"}),
            fields.to_body().unwrap()
        );
    }

    #[test]
    fn test_body_extra() {
        let fields = BillFields::new("10", "RUB")
            .extra("extras[comm]", "value")
            .extra("amount", 999);
        assert_eq!(
            json!({"amount": "10.00", "ccy": "RUB", "extras[comm]": "value"}),
            fields.to_body().unwrap()
        );
    }

    #[test]
    fn test_body_invalid_amount() {
        let fields = BillFields::new("ten", "RUB");
        assert!(matches!(
            fields.to_body(),
            Err(QiwiError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_lifetime() {
        let now = Utc.with_ymd_and_hms(2018, 3, 1, 12, 30, 5).unwrap();
        assert_eq!("2018-03-02T12:30:05", lifetime_by_days_from(now, 1).unwrap());
        assert_eq!("2018-03-31T12:30:05", lifetime_by_days_from(now, 30).unwrap());
        assert_eq!("2018-03-01T12:30:05", lifetime_by_days_from(now, 0).unwrap());
    }

    #[test]
    fn test_lifetime_out_of_range() {
        let now = Utc.with_ymd_and_hms(2018, 3, 1, 12, 30, 5).unwrap();
        assert!(matches!(
            lifetime_by_days_from(now, 1_000_000_000_000),
            Err(QiwiError::InvalidLifetime(1_000_000_000_000))
        ));
        assert!(matches!(
            lifetime_by_days_from(now, i64::MIN),
            Err(QiwiError::InvalidLifetime(i64::MIN))
        ));
        // fits into a TimeDelta but not into a date
        assert!(matches!(
            lifetime_by_days_from(now, 100_000_000),
            Err(QiwiError::InvalidLifetime(100_000_000))
        ));
        assert!(lifetime_by_days(1_000_000_000_000).is_err());
    }
}
