use serde::Serialize;
use utoipa::ToSchema;

/// The fixed set of payment channels. Not stored: transactions keep the
/// label as free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub enum PaymentMethod {
    Cash,
    #[default]
    Transfer,
    EWallet,
    CreditCard,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Transfer,
        PaymentMethod::EWallet,
        PaymentMethod::CreditCard,
    ];

    /// Label stored on transactions and offered to clients.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Tiền mặt",
            PaymentMethod::Transfer => "Chuyển khoản",
            PaymentMethod::EWallet => "Ví điện tử",
            PaymentMethod::CreditCard => "Thẻ tín dụng",
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(PaymentMethod::label).collect()
    }
}
