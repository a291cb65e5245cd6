//! Receiver addressing: `(type, id)` pairs and the entities behind them.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::builder::MsgpackObjectBuilder;
use crate::error::{ConversionError, Result};
use crate::imaging;
use crate::model::{ContactModel, DistributionListModel, GroupModel, Receiver};
use crate::protocol;
use crate::services::ConversionContext;

pub const ID: &str = "id";
pub const TYPE: &str = "type";
pub const DISPLAY_NAME: &str = "displayName";
pub const COLOR: &str = "color";
pub const ACCESS: &str = "access";
pub const CAN_DELETE: &str = "canDelete";
pub const LOCKED: &str = "locked";
pub const VISIBLE: &str = "visible";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReceiverType {
    Contact,
    Group,
    DistributionList,
}

impl ReceiverType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReceiverType::Contact => "contact",
            ReceiverType::Group => "group",
            ReceiverType::DistributionList => "distributionList",
        }
    }
}

impl fmt::Display for ReceiverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReceiverType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "contact" => Ok(ReceiverType::Contact),
            "group" => Ok(ReceiverType::Group),
            "distributionList" => Ok(ReceiverType::DistributionList),
            other => Err(ConversionError::unknown_value("receiver type", other)),
        }
    }
}

/// A resolved receiver, or the id of a group that no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelWrapper {
    Contact(ContactModel),
    Group(GroupModel),
    /// A group removed from the store; only its id survives.
    RemovedGroup(i64),
    DistributionList(DistributionListModel),
}

impl From<Receiver> for ModelWrapper {
    fn from(receiver: Receiver) -> Self {
        match receiver {
            Receiver::Contact(contact) => ModelWrapper::Contact(contact),
            Receiver::Group(group) => ModelWrapper::Group(group),
            Receiver::DistributionList(list) => ModelWrapper::DistributionList(list),
        }
    }
}

impl From<&Receiver> for ModelWrapper {
    fn from(receiver: &Receiver) -> Self {
        receiver.clone().into()
    }
}

fn parse_numeric_id(receiver_type: ReceiverType, id: &str) -> Result<i64> {
    id.parse().map_err(|_| {
        ConversionError::new(format!("invalid {receiver_type} id '{id}'"))
    })
}

impl ModelWrapper {
    /// Resolves a `(type, id)` pair through the collaborator services.
    pub fn from_type_id(ctx: &ConversionContext<'_>, receiver_type: &str, id: &str) -> Result<Self> {
        let receiver_type: ReceiverType = receiver_type.parse()?;
        debug!(%receiver_type, id, "resolving receiver");
        let services = &ctx.services;
        let wrapper = match receiver_type {
            ReceiverType::Contact => services
                .contacts
                .by_identity(id)?
                .map(ModelWrapper::Contact),
            ReceiverType::Group => {
                let group_id = parse_numeric_id(receiver_type, id)?;
                services.groups.by_id(group_id)?.map(ModelWrapper::Group)
            }
            ReceiverType::DistributionList => {
                let list_id = parse_numeric_id(receiver_type, id)?;
                services
                    .distribution_lists
                    .by_id(list_id)?
                    .map(ModelWrapper::DistributionList)
            }
        };
        wrapper.ok_or_else(|| ConversionError::unresolved_receiver(receiver_type.as_str(), id))
    }

    pub fn receiver_type(&self) -> ReceiverType {
        match self {
            ModelWrapper::Contact(_) => ReceiverType::Contact,
            ModelWrapper::Group(_) | ModelWrapper::RemovedGroup(_) => ReceiverType::Group,
            ModelWrapper::DistributionList(_) => ReceiverType::DistributionList,
        }
    }

    pub fn id(&self) -> String {
        match self {
            ModelWrapper::Contact(contact) => contact.identity.clone(),
            ModelWrapper::Group(group) => group.id.to_string(),
            ModelWrapper::RemovedGroup(id) => id.to_string(),
            ModelWrapper::DistributionList(list) => list.id.to_string(),
        }
    }

    /// Key used by per-conversation settings such as hidden chats.
    pub fn unique_id(&self) -> String {
        format!("{}-{}", self.receiver_type(), self.id())
    }

    /// The live receiver. Fails for removed groups.
    pub fn receiver(&self) -> Result<Receiver> {
        match self {
            ModelWrapper::Contact(contact) => Ok(Receiver::Contact(contact.clone())),
            ModelWrapper::Group(group) => Ok(Receiver::Group(group.clone())),
            ModelWrapper::RemovedGroup(id) => Err(ConversionError::unresolved_receiver(
                ReceiverType::Group.as_str(),
                &id.to_string(),
            )),
            ModelWrapper::DistributionList(list) => Ok(Receiver::DistributionList(list.clone())),
        }
    }

    /// Light-theme color as ARGB.
    pub fn color(&self) -> Result<u32> {
        match self {
            ModelWrapper::Contact(contact) => Ok(contact.color_light),
            ModelWrapper::Group(group) => Ok(group.color_light),
            ModelWrapper::DistributionList(list) => Ok(list.color_light),
            ModelWrapper::RemovedGroup(_) => Err(ConversionError::missing_field("group")),
        }
    }

    /// PNG-encoded avatar, or `None` when the receiver has none.
    ///
    /// Low resolution avatars start from the notification avatar and are
    /// bounded by `max_size` (the configured low-res bound when `None`).
    /// High resolution avatars are only resized when `max_size` is given.
    pub fn avatar(
        &self,
        ctx: &ConversionContext<'_>,
        high_resolution: bool,
        max_size: Option<u32>,
    ) -> Result<Option<Vec<u8>>> {
        let services = &ctx.services;
        let bitmap = match self {
            ModelWrapper::Contact(contact) => services.contacts.avatar(contact, high_resolution)?,
            ModelWrapper::Group(group) => services.groups.avatar(group, high_resolution)?,
            ModelWrapper::DistributionList(list) => {
                services.distribution_lists.avatar(list, high_resolution)?
            }
            ModelWrapper::RemovedGroup(_) => None,
        };
        let Some(bitmap) = bitmap else {
            debug!(receiver = %self.unique_id(), "no avatar");
            return Ok(None);
        };
        let bound = if high_resolution {
            max_size
        } else {
            Some(max_size.unwrap_or(ctx.config.avatar.lores_max_px))
        };
        let bitmap = match bound {
            Some(bound) => imaging::resize(bitmap, bound),
            None => bitmap,
        };
        imaging::encode(&bitmap, protocol::FORMAT_AVATAR, 100)
            .map(Some)
            .map_err(|err| ConversionError::new(format!("avatar encoding failed: {err}")))
    }

    /// `{type, id}` envelope addressing this receiver.
    pub fn arguments(&self) -> MsgpackObjectBuilder {
        MsgpackObjectBuilder::new()
            .put(TYPE, self.receiver_type().as_str())
            .put(ID, self.id())
    }
}

/// `#RRGGBB` from an ARGB color.
pub fn color_hex(argb: u32) -> String {
    format!("#{:06X}", argb & 0x00ff_ffff)
}

/// Appends `locked` and `visible` for the chat with `unique_id`.
///
/// A hidden chat is locked; it is invisible while private chats are hidden.
pub(crate) fn put_visibility(
    ctx: &ConversionContext<'_>,
    builder: MsgpackObjectBuilder,
    unique_id: &str,
) -> Result<MsgpackObjectBuilder> {
    let locked = ctx.services.hidden_chats.has(unique_id)?;
    let visible = !locked || !ctx.services.preferences.private_chats_hidden()?;
    Ok(builder.put(LOCKED, locked).put(VISIBLE, visible))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receiver_type_names() {
        for ty in [
            ReceiverType::Contact,
            ReceiverType::Group,
            ReceiverType::DistributionList,
        ] {
            assert_eq!(ty.as_str().parse::<ReceiverType>(), Ok(ty));
        }
        assert!("distribution_list".parse::<ReceiverType>().is_err());
        assert!("Contact".parse::<ReceiverType>().is_err());
    }

    #[test]
    fn color_drops_alpha() {
        assert_eq!(color_hex(0xff12_ab00), "#12AB00");
        assert_eq!(color_hex(0x0000_0001), "#000001");
    }

    #[test]
    fn removed_group_keeps_its_address() {
        let removed = ModelWrapper::RemovedGroup(42);
        assert_eq!(removed.receiver_type(), ReceiverType::Group);
        assert_eq!(removed.unique_id(), "group-42");
        assert!(removed.receiver().is_err());
        assert!(removed.color().is_err());
    }
}
