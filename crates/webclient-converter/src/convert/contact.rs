//! Contact projection.

use crate::builder::{MsgpackArrayBuilder, MsgpackBuilder, MsgpackObjectBuilder};
use crate::error::Result;
use crate::model::{ContactModel, IdentityType, LabeledValue};
use crate::services::ConversionContext;

use super::receiver::{self, ModelWrapper, ACCESS, CAN_DELETE, COLOR, DISPLAY_NAME, ID};
use super::verification_level;

const PUBLIC_NICKNAME: &str = "publicNickname";
const FIRST_NAME: &str = "firstName";
const LAST_NAME: &str = "lastName";
const VERIFICATION_LEVEL: &str = "verificationLevel";
const STATE: &str = "state";
const HIDDEN: &str = "hidden";
const IS_WORK: &str = "isWork";
const PUBLIC_KEY: &str = "publicKey";
const IDENTITY_TYPE: &str = "identityType";
const IS_BLOCKED: &str = "isBlocked";
const FEATURE_MASK: &str = "featureMask";
const FEATURE_LEVEL: &str = "featureLevel";
const CAN_CHANGE_AVATAR: &str = "canChangeAvatar";
const CAN_CHANGE_FIRST_NAME: &str = "canChangeFirstName";
const CAN_CHANGE_LAST_NAME: &str = "canChangeLastName";
const SYSTEM_CONTACT: &str = "systemContact";
const PHONE_NUMBERS: &str = "phoneNumbers";
const EMAILS: &str = "emails";
const LABEL: &str = "label";
const NUMBER: &str = "number";
const ADDRESS: &str = "address";

const FEATURE_AUDIO: i64 = 0x01;
const FEATURE_GROUP_CHAT: i64 = 0x02;
const FEATURE_BALLOT: i64 = 0x04;
const FEATURE_FILE: i64 = 0x08;
const FEATURE_VOIP: i64 = 0x10;

/// `None` for absent or empty strings.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Name shown in lists: the full name, else `~nickname`, else the identity.
pub fn display_name(contact: &ContactModel) -> String {
    let full_name = [contact.first_name.as_deref(), contact.last_name.as_deref()]
        .into_iter()
        .filter_map(non_empty)
        .collect::<Vec<_>>()
        .join(" ");
    if !full_name.trim().is_empty() {
        return full_name.trim().to_owned();
    }
    match non_empty(contact.public_nickname.as_deref()) {
        Some(nickname) if nickname != contact.identity => format!("~{nickname}"),
        _ => contact.identity.clone(),
    }
}

/// Coarse capability level derived from the feature mask.
pub fn feature_level(feature_mask: i64) -> i32 {
    if feature_mask & FEATURE_VOIP != 0 {
        4
    } else if feature_mask & FEATURE_FILE != 0 {
        3
    } else if feature_mask & FEATURE_BALLOT != 0 {
        2
    } else if feature_mask & (FEATURE_AUDIO | FEATURE_GROUP_CHAT) == FEATURE_AUDIO | FEATURE_GROUP_CHAT
    {
        1
    } else {
        0
    }
}

pub fn convert(ctx: &ConversionContext<'_>, contact: &ContactModel) -> Result<MsgpackObjectBuilder> {
    let services = &ctx.services;
    let identity = contact.identity.as_str();
    let unique_id = ModelWrapper::Contact(contact.clone()).unique_id();

    let builder = MsgpackObjectBuilder::new()
        .put(ID, identity)
        .put(DISPLAY_NAME, display_name(contact))
        .put(COLOR, receiver::color_hex(contact.color_light))
        .maybe_put(FIRST_NAME, non_empty(contact.first_name.as_deref()))
        .maybe_put(LAST_NAME, non_empty(contact.last_name.as_deref()))
        .maybe_put(PUBLIC_NICKNAME, non_empty(contact.public_nickname.as_deref()))
        .put(
            VERIFICATION_LEVEL,
            verification_level::convert(contact.verification_level),
        )
        .put(STATE, contact.state.to_string())
        .put(HIDDEN, contact.is_hidden)
        .maybe_put(IS_WORK, ctx.config.work_build.then_some(contact.is_work))
        .put(PUBLIC_KEY, contact.public_key.as_slice())
        .put(
            IDENTITY_TYPE,
            match contact.identity_type {
                IdentityType::Normal => 0_i32,
                IdentityType::Work => 1_i32,
            },
        )
        .put(IS_BLOCKED, services.blocked_contacts.is_blocked(identity)?)
        .put(FEATURE_MASK, contact.feature_mask)
        .put(FEATURE_LEVEL, feature_level(contact.feature_mask));
    let builder = receiver::put_visibility(ctx, builder, &unique_id)?;

    let linked = contact.is_linked_to_system_contact();
    let can_change_avatar =
        !contact.is_gateway() && !(linked && services.preferences.system_contact_avatars()?);
    let access = MsgpackObjectBuilder::new()
        .put(CAN_DELETE, services.contacts.access(identity)?.can_delete)
        .put(CAN_CHANGE_AVATAR, can_change_avatar)
        .put(CAN_CHANGE_FIRST_NAME, !linked)
        .put(CAN_CHANGE_LAST_NAME, !linked);
    Ok(builder.put(ACCESS, access))
}

pub fn convert_all(ctx: &ConversionContext<'_>, contacts: &[ContactModel]) -> Result<Vec<MsgpackBuilder>> {
    contacts
        .iter()
        .map(|contact| convert(ctx, contact).map(MsgpackBuilder::from))
        .collect()
}

fn labeled(values: &[LabeledValue], value_key: &'static str) -> MsgpackArrayBuilder {
    values
        .iter()
        .map(|entry| {
            MsgpackObjectBuilder::new()
                .put(LABEL, entry.label.as_str())
                .put(value_key, entry.value.as_str())
        })
        .collect()
}

/// System address-book details of a contact. Unlinked contacts yield empty lists.
pub fn convert_details(
    ctx: &ConversionContext<'_>,
    contact: &ContactModel,
) -> Result<MsgpackObjectBuilder> {
    let details = match contact.system_contact_lookup_key.as_deref() {
        Some(lookup_key) => ctx.services.system_contacts.details(lookup_key)?,
        None => Default::default(),
    };
    let system_contact = MsgpackObjectBuilder::new()
        .put(PHONE_NUMBERS, labeled(&details.phone_numbers, NUMBER))
        .put(EMAILS, labeled(&details.emails, ADDRESS));
    Ok(MsgpackObjectBuilder::new().put(SYSTEM_CONTACT, system_contact))
}

pub fn arguments(contact: &ContactModel) -> MsgpackObjectBuilder {
    MsgpackObjectBuilder::new().put(ID, contact.identity.as_str())
}
