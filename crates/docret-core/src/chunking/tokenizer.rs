/// Fast token estimation using character count
///
/// ~3.5 characters per token. Precision is irrelevant; every size
/// comparison in this crate goes through this one function, so only
/// self-consistency matters.
pub fn estimate_tokens(text: &str) -> usize {
    let chars = text.chars().count();
    // ceil(chars / 3.5) in integer arithmetic
    (chars * 2 + 6) / 7
}
