use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;
use crate::models::{MessageRequest, MessageResponse};
use crate::risk::RiskTier;
use crate::validation;

lazy_static! {
    static ref SCRIPT_BLOCK: Regex = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
}

pub fn compose_message(request: MessageRequest) -> Result<MessageResponse, ApiError> {
    let request = validation::validate_message_request(request)?;
    tracing::info!(
        student = %request.student_name,
        risk = request.risk_score,
        "message requested"
    );

    let message = render(RiskTier::from_score(request.risk_score), &request.student_name);
    Ok(MessageResponse {
        message: strip_script_blocks(&message),
    })
}

fn render(tier: RiskTier, name: &str) -> String {
    match tier {
        RiskTier::High => format!("Hi {name}, we noticed you missed 2 assignments. Need help?"),
        RiskTier::Medium => format!("Hi {name}, you're doing well! Keep up the good work."),
        RiskTier::Low => format!("Hi {name}, great job staying on track!"),
    }
}

/// Removes `<script ...>...</script>` blocks, case-insensitively and across lines.
/// Text without such a block is returned as is.
pub fn strip_script_blocks(text: &str) -> String {
    SCRIPT_BLOCK.replace_all(text, "").into_owned()
}
