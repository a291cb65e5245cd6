//! Group projection.

use crate::builder::{MsgpackArrayBuilder, MsgpackBuilder, MsgpackObjectBuilder};
use crate::error::Result;
use crate::model::GroupModel;
use crate::services::ConversionContext;

use super::contact::{self, non_empty};
use super::receiver::{self, ModelWrapper, ACCESS, CAN_DELETE, COLOR, DISPLAY_NAME, ID};

const DISABLED: &str = "disabled";
const MEMBERS: &str = "members";
const ADMINISTRATOR: &str = "administrator";
const CREATED_AT: &str = "createdAt";
const CAN_CHANGE_AVATAR: &str = "canChangeAvatar";
const CAN_CHANGE_NAME: &str = "canChangeName";
const CAN_CHANGE_MEMBERS: &str = "canChangeMembers";
const CAN_LEAVE: &str = "canLeave";
const CAN_SYNC: &str = "canSync";

/// Capabilities of the own identity within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupAccess {
    pub can_delete: bool,
    pub can_change_avatar: bool,
    pub can_change_name: bool,
    pub can_change_members: bool,
    pub can_leave: bool,
    pub can_sync: bool,
}

impl GroupAccess {
    /// `is_admin`: the own identity created the group.
    /// `is_enabled`: the own identity is still a member.
    pub fn new(is_admin: bool, is_enabled: bool) -> Self {
        let manages = is_admin && is_enabled;
        Self {
            can_delete: is_admin || !is_enabled,
            can_change_avatar: manages,
            can_change_name: manages,
            can_change_members: manages,
            can_leave: is_enabled && !is_admin,
            can_sync: manages,
        }
    }

    fn into_builder(self) -> MsgpackObjectBuilder {
        MsgpackObjectBuilder::new()
            .put(CAN_DELETE, self.can_delete)
            .put(CAN_CHANGE_AVATAR, self.can_change_avatar)
            .put(CAN_CHANGE_NAME, self.can_change_name)
            .put(CAN_CHANGE_MEMBERS, self.can_change_members)
            .put(CAN_LEAVE, self.can_leave)
            .put(CAN_SYNC, self.can_sync)
    }
}

/// The group name, or the member names when it has none.
pub fn display_name(ctx: &ConversionContext<'_>, group: &GroupModel, members: &[String]) -> Result<String> {
    if let Some(name) = non_empty(group.name.as_deref()) {
        return Ok(name.to_owned());
    }
    let mut names = Vec::with_capacity(members.len());
    for identity in members {
        let name = match ctx.services.contacts.by_identity(identity)? {
            Some(contact) => contact::display_name(&contact),
            None => identity.clone(),
        };
        names.push(name);
    }
    Ok(names.join(", "))
}

pub fn convert(ctx: &ConversionContext<'_>, group: &GroupModel) -> Result<MsgpackObjectBuilder> {
    let groups = ctx.services.groups;
    let members = groups.member_identities(group)?;
    let is_admin = groups.is_creator(group)?;
    let is_enabled = groups.is_member(group)?;
    let unique_id = ModelWrapper::Group(group.clone()).unique_id();

    let builder = MsgpackObjectBuilder::new()
        .put(ID, group.id.to_string())
        .put(DISPLAY_NAME, display_name(ctx, group, &members)?)
        .put(COLOR, receiver::color_hex(group.color_light))
        .put(DISABLED, !is_enabled)
        .put(
            MEMBERS,
            members.into_iter().collect::<MsgpackArrayBuilder>(),
        )
        .put(ADMINISTRATOR, group.creator_identity.as_str())
        .maybe_put(CREATED_AT, group.created_at.map(|ms| ms / 1000));
    let builder = receiver::put_visibility(ctx, builder, &unique_id)?;
    Ok(builder.put(ACCESS, GroupAccess::new(is_admin, is_enabled).into_builder()))
}

pub fn convert_all(ctx: &ConversionContext<'_>, groups: &[GroupModel]) -> Result<Vec<MsgpackBuilder>> {
    groups
        .iter()
        .map(|group| convert(ctx, group).map(MsgpackBuilder::from))
        .collect()
}

pub fn arguments(group: &GroupModel) -> MsgpackObjectBuilder {
    MsgpackObjectBuilder::new().put(ID, group.id.to_string())
}
