//! Typed records decoded from a data package, and the [`PackageData`]
//! aggregate that holds them once a load has finished.
//!
//! Every record defaults missing fields so minor schema drift between export
//! versions does not reject a whole file.

mod account;
mod ads;
mod exports;
pub(crate) mod lenient;
mod messages;
mod servers;
mod support;

pub use account::*;
pub use ads::AdTraits;
pub use exports::{DataExportEnvelope, ExportColumn, ExportMetadata};
pub use messages::{ChannelGuild, ChannelMeta, LoadedChannel, MESSAGE_TIMESTAMP_FORMAT, Message};
pub use servers::*;
pub use support::{SupportTicket, TicketComment};

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Everything decoded from one package.
///
/// Built by a single load and never mutated after it is published.
#[derive(Debug, Default, Serialize)]
pub struct PackageData {
    // Account
    pub user_profile: Option<UserProfile>,
    pub avatar: Option<Avatar>,

    // Messages
    pub channel_index: HashMap<String, String>,
    pub channels: BTreeMap<String, LoadedChannel>,

    // Servers
    pub server_index: HashMap<String, String>,
    pub servers: BTreeMap<String, LoadedServer>,

    pub ad_traits: Option<AdTraits>,
    pub support_tickets: BTreeMap<String, SupportTicket>,

    /// In archive order
    pub data_exports: Vec<DataExportEnvelope>,

    /// Section name to events; `None` when the package has no usable activity files
    pub activity: Option<BTreeMap<String, Vec<Value>>>,
}

impl PackageData {
    pub fn total_messages(&self) -> usize {
        self.channels.values().map(LoadedChannel::message_count).sum()
    }

    pub fn total_channels(&self) -> usize {
        self.channels.len()
    }

    /// Servers named in `Servers/index.json`; folders only exist for some of them
    pub fn total_servers(&self) -> usize {
        self.server_index.len()
    }

    pub fn total_friends(&self) -> usize {
        self.user_profile
            .as_ref()
            .map_or(0, UserProfile::friend_count)
    }
}
