//! HTML pages rendered with handlebars. Templates are embedded at compile
//! time; values are HTML-escaped.

use gateway_core::PaymentSession;
use gateway_shared::AppError;
use handlebars::Handlebars;
use serde_json::json;

use crate::error::ApiError;

const STYLES: &str = include_str!("../templates/styles.hbs");
const MOCK_PAYMENT: &str = include_str!("../templates/mock_payment.hbs");
const PAYMENT_RESULT: &str = include_str!("../templates/payment_result.hbs");
const NOT_FOUND: &str = include_str!("../templates/not_found.hbs");

/// Which confirmation page to show after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultPage {
    Success,
    Cancel,
}

pub struct PageRenderer {
    registry: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        registry
            .register_partial("styles", STYLES)
            .map_err(|e| AppError::TemplateError(e.to_string()))?;
        for (name, source) in [
            ("mock_payment", MOCK_PAYMENT),
            ("payment_result", PAYMENT_RESULT),
            ("not_found", NOT_FOUND),
        ] {
            registry
                .register_template_string(name, source)
                .map_err(|e| AppError::TemplateError(e.to_string()))?;
        }

        Ok(Self { registry })
    }

    /// Checkout page with the three outcome buttons
    pub fn mock_payment(&self, session: &PaymentSession) -> Result<String, ApiError> {
        let data = json!({
            "session_id": session.id,
            "order_id": session.order_id,
            "amount": session.amount.to_string(),
            "currency": session.currency,
            "customer_phone": session.customer_phone.clone().unwrap_or_default(),
            "status": session.status.as_str(),
            "resolved": session.is_resolved(),
            "process_url": format!("/process-mock-payment/{}", session.id),
        });
        self.render("mock_payment", &data)
    }

    pub fn result(&self, page: ResultPage) -> Result<String, ApiError> {
        let data = match page {
            ResultPage::Success => json!({
                "title": "Payment successful",
                "message": "The mock payment was accepted. You can close this window.",
                "tone": "success",
            }),
            ResultPage::Cancel => json!({
                "title": "Payment not completed",
                "message": "The mock payment was cancelled or failed.",
                "tone": "cancel",
            }),
        };
        self.render("payment_result", &data)
    }

    pub fn not_found(&self, session_id: &str) -> Result<String, ApiError> {
        self.render("not_found", &json!({ "session_id": session_id }))
    }

    fn render(&self, name: &str, data: &serde_json::Value) -> Result<String, ApiError> {
        self.registry
            .render(name, data)
            .map_err(|e| ApiError::InternalError(format!("Failed to render {}: {}", name, e)))
    }
}
