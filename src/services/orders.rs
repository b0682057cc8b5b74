//! Order Submission
//!
//! The final hand-off: an assembled [`OrderPayload`] is submitted to the order
//! endpoint, which either confirms with an order id or fails. Submission never
//! touches the ledger: a failed submission must leave the cart intact so the
//! customer can retry.

use thiserror::Error;

use crate::checkout::OrderPayload;

/// Errors surfaced by the order endpoint.
#[derive(Debug, Error, PartialEq)]
pub enum SubmitError {
    /// The payment was declined by the processor.
    #[error("payment declined: {0}")]
    PaymentDeclined(String),

    /// The endpoint could not be reached.
    #[error("order endpoint unreachable: {0}")]
    Unreachable(String),
}

/// Submission outcome as reported by the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// The order was accepted and will be fulfilled.
    Accepted,

    /// The order was received but is awaiting review.
    Pending,
}

/// A confirmed submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    /// Identifier assigned by the order endpoint.
    pub order_id: String,

    /// Submission outcome.
    pub status: OrderStatus,
}

/// Accepts assembled order payloads.
pub trait OrderGateway {
    /// Submit `payload` for processing.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmitError`] if the payment is declined or the endpoint is
    /// unreachable. The caller's ledger must remain untouched in either case.
    fn submit(&mut self, payload: &OrderPayload) -> Result<OrderConfirmation, SubmitError>;
}

/// In-memory [`OrderGateway`] that records accepted payloads and can be
/// scripted to fail the next submission.
#[derive(Debug, Default)]
pub struct RecordingGateway {
    accepted: Vec<OrderPayload>,
    fail_next: Option<SubmitError>,
    sequence: u64,
}

impl RecordingGateway {
    /// Create a gateway that accepts every submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the next submission with `error`, then resume accepting.
    pub fn fail_next_with(&mut self, error: SubmitError) {
        self.fail_next = Some(error);
    }

    /// Payloads accepted so far, in submission order.
    #[must_use]
    pub fn accepted(&self) -> &[OrderPayload] {
        &self.accepted
    }
}

impl OrderGateway for RecordingGateway {
    fn submit(&mut self, payload: &OrderPayload) -> Result<OrderConfirmation, SubmitError> {
        if let Some(error) = self.fail_next.take() {
            return Err(error);
        }

        self.sequence += 1;
        self.accepted.push(payload.clone());

        Ok(OrderConfirmation {
            order_id: format!("ord-{:06}", self.sequence),
            status: OrderStatus::Accepted,
        })
    }
}
