use strum::AsRefStr;
use url::form_urlencoded;

use crate::error::QiwiError;

pub const FORM_URL: &str = "https://bill.qiwi.com/order/external";

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FormKind {
    /// Payment page for a bill that already exists.
    Main,
    /// Creates the bill and opens its payment page.
    Create,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormOptions {
    pub shop: Option<String>,
    pub transaction: Option<String>,
    pub iframe: bool,
    pub success_url: Option<String>,
    pub fail_url: Option<String>,
    pub pay_source: Option<String>,
}

impl FormOptions {
    pub fn new(transaction: impl Into<String>) -> Self {
        FormOptions {
            transaction: Some(transaction.into()),
            ..Default::default()
        }
    }

    pub fn shop(mut self, shop: impl Into<String>) -> Self {
        self.shop = Some(shop.into());
        self
    }

    pub fn iframe(mut self, iframe: bool) -> Self {
        self.iframe = iframe;
        self
    }

    pub fn success_url(mut self, success_url: impl Into<String>) -> Self {
        self.success_url = Some(success_url.into());
        self
    }

    pub fn fail_url(mut self, fail_url: impl Into<String>) -> Self {
        self.fail_url = Some(fail_url.into());
        self
    }

    pub fn pay_source(mut self, pay_source: impl Into<String>) -> Self {
        self.pay_source = Some(pay_source.into());
        self
    }
}

/// Builds the hosted payment page url. `prv_id` stands in for a missing shop.
pub fn payment_form_url(
    prv_id: &str,
    kind: FormKind,
    options: &FormOptions,
) -> Result<String, QiwiError> {
    let transaction = options
        .transaction
        .as_deref()
        .filter(|transaction| !transaction.is_empty())
        .ok_or(QiwiError::MissingTransaction)?;
    let shop = options
        .shop
        .as_deref()
        .filter(|shop| !shop.is_empty())
        .unwrap_or(prv_id);

    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("shop", shop)
        .append_pair("transaction", transaction)
        .append_pair("iframe", if options.iframe { "true" } else { "false" })
        .append_pair("successUrl", options.success_url.as_deref().unwrap_or(""))
        .append_pair("failUrl", options.fail_url.as_deref().unwrap_or(""))
        .append_pair("pay_source", options.pay_source.as_deref().unwrap_or(""))
        .finish();

    Ok(format!("{}/{}.action?{}", FORM_URL, kind.as_ref(), query))
}
