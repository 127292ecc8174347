pub mod amount;
pub mod bill;
pub mod error;
pub mod form;
pub mod id;
pub mod request;
pub mod transport;

pub use amount::Amount;
pub use bill::{lifetime_by_days, BillFields};
pub use error::QiwiError;
pub use form::{FormKind, FormOptions};
pub use id::{IdSource, UuidSource};
pub use request::{Credentials, Method, RequestDescriptor};
pub use transport::{ReqwestTransport, Transport, TransportError};

use log::debug;
use serde_json::{json, Value};

/// Client for the pull REST API (protocol v2).
///
/// Credentials are plain fields: a setter affects every request issued after it,
/// requests already built keep the values they were built with.
pub struct QiwiPull<T = ReqwestTransport, I = UuidSource> {
    credentials: Credentials,
    transport: T,
    ids: I,
}

impl QiwiPull {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            transport: ReqwestTransport::default(),
            ids: UuidSource,
        }
    }
}

impl<T, I> QiwiPull<T, I> {
    pub fn with_transport<U: Transport>(self, transport: U) -> QiwiPull<U, I> {
        QiwiPull {
            credentials: self.credentials,
            transport,
            ids: self.ids,
        }
    }

    pub fn with_id_source<J: IdSource>(self, ids: J) -> QiwiPull<T, J> {
        QiwiPull {
            credentials: self.credentials,
            transport: self.transport,
            ids,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn set_api_id(&mut self, api_id: impl Into<String>) {
        self.credentials.api_id = api_id.into();
    }

    pub fn set_api_password(&mut self, api_password: impl Into<String>) {
        self.credentials.api_password = api_password.into();
    }

    pub fn set_prv_id(&mut self, prv_id: impl Into<String>) {
        self.credentials.prv_id = prv_id.into();
    }

    /// Url of the payment page for an existing bill. No network call.
    pub fn create_payment_form(&self, options: &FormOptions) -> Result<String, QiwiError> {
        form::payment_form_url(&self.credentials.prv_id, FormKind::Main, options)
    }

    /// Url of the page that creates the bill and lets the payer pay it. No network call.
    pub fn create_bill_and_payment_form(
        &self,
        options: &FormOptions,
    ) -> Result<String, QiwiError> {
        form::payment_form_url(&self.credentials.prv_id, FormKind::Create, options)
    }
}

impl<T: Transport, I: IdSource> QiwiPull<T, I> {
    pub fn generate_id(&self) -> String {
        self.ids.generate()
    }

    pub async fn create_bill(
        &self,
        bill_id: &str,
        fields: &BillFields,
    ) -> Result<Value, QiwiError> {
        let body = fields.to_body()?;
        self.call(bill_id, Method::Put, Some(body)).await
    }

    pub async fn get_status(&self, bill_id: &str) -> Result<Value, QiwiError> {
        self.call(bill_id, Method::Get, None).await
    }

    /// Rejects an unpaid bill.
    pub async fn cancel(&self, bill_id: &str) -> Result<Value, QiwiError> {
        self.call(bill_id, Method::Patch, Some(json!({ "status": "rejected" })))
            .await
    }

    pub async fn refund(
        &self,
        bill_id: &str,
        refund_id: &str,
        amount: Option<Amount>,
    ) -> Result<Value, QiwiError> {
        let amount = crate::amount::normalize(amount.as_ref())?;
        self.call(
            &refund_suffix(bill_id, refund_id),
            Method::Put,
            Some(json!({ "amount": amount })),
        )
        .await
    }

    pub async fn get_refund_status(
        &self,
        bill_id: &str,
        refund_id: &str,
    ) -> Result<Value, QiwiError> {
        self.call(&refund_suffix(bill_id, refund_id), Method::Get, None)
            .await
    }

    async fn call(
        &self,
        suffix: &str,
        method: Method,
        body: Option<Value>,
    ) -> Result<Value, QiwiError> {
        let request = RequestDescriptor::build(&self.credentials, suffix, method, body)?;
        debug!("Qiwi request: {} {}", request.method, request.path);
        let response = self.transport.send(request).await?;
        serde_json::from_str(&response).map_err(QiwiError::Parse)
    }
}

fn refund_suffix(bill_id: &str, refund_id: &str) -> String {
    format!("{}/refund/{}", bill_id, refund_id)
}
