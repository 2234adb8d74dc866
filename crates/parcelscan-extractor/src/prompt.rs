//! Prompt construction for delivery-detail extraction

const EXTRACTION_INSTRUCTIONS: &str = r#"Extract delivery-related details from the following email and return a JSON object with these keys:
- delivery: "yes" if delivery is confirmed, otherwise "no"
- price_num: extracted price amount, default to 0.00 if not found
- description: short description of the product if available
- order_id: extracted order ID if available
- delivery_date: extracted delivery date in YYYY-MM-DD format if available
- store: store or sender name
- tracking_number: extracted tracking number if available
- carrier: extracted carrier name (FedEx, UPS, USPS, etc.) if available

Return ONLY the JSON object, no markdown code blocks, no explanations."#;

/// Build the fixed-schema extraction prompt embedding the message text.
pub fn build_prompt(subject: &str, body: &str) -> String {
    format!(
        "{}\n\nEmail:\nSubject: {}\n\nBody:\n{}\n\nOutput JSON:",
        EXTRACTION_INSTRUCTIONS, subject, body
    )
}
