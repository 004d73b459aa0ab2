//! ID prefix constants.
//!
//! Ticket IDs are `{prefix}-{8 hex chars}`, generated by the ticket store.

pub const PREFIX_TICKET: &str = "tkt";

/// Check that `id` has the `{prefix}-{8 lowercase hex}` shape.
#[must_use]
pub fn is_well_formed(prefix: &str, id: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| {
            hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        })
}
