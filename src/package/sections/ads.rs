//! The two single-file sections: `Ads/traits.json` and
//! `Support_Tickets/tickets.json`.

use std::collections::BTreeMap;

use crate::models::{AdTraits, PackageData, SupportTicket};
use crate::package::router::Target;

use super::{DecodeResult, decode};

pub(crate) fn classify_ads(rest: &str) -> Option<Target<'_>> {
    rest.eq_ignore_ascii_case("traits.json")
        .then_some(Target::AdTraits)
}

pub(crate) fn classify_support(rest: &str) -> Option<Target<'_>> {
    rest.eq_ignore_ascii_case("tickets.json")
        .then_some(Target::SupportTickets)
}

pub(crate) fn apply_traits(content: &[u8], data: &mut PackageData) -> DecodeResult {
    data.ad_traits = Some(decode::<AdTraits>(content)?);
    Ok(())
}

pub(crate) fn apply_tickets(content: &[u8], data: &mut PackageData) -> DecodeResult {
    data.support_tickets = decode::<BTreeMap<String, SupportTicket>>(content)?;
    Ok(())
}
