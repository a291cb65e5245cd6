//! Device and app description sent when a session starts.

use crate::builder::MsgpackObjectBuilder;
use crate::error::Result;
use crate::model::MdmRestrictions;
use crate::protocol;
use crate::services::ConversionContext;

const DEVICE: &str = "device";
const OS: &str = "os";
const OS_VERSION: &str = "osVersion";
const APP_VERSION: &str = "appVersion";
const IS_WORK: &str = "isWork";
const PUSH_TOKEN: &str = "pushToken";
const CONFIGURATION: &str = "configuration";
const VOIP_ENABLED: &str = "voipEnabled";
const VOIP_FORCE_TURN: &str = "voipForceTurn";
const LARGE_SINGLE_EMOJI: &str = "largeSingleEmoji";
const SHOW_INACTIVE_IDS: &str = "showInactiveIDs";
const CAPABILITIES: &str = "capabilities";
const MAX_GROUP_SIZE: &str = "maxGroupSize";
const MAX_FILE_SIZE: &str = "maxFileSize";
const DISTRIBUTION_LISTS: &str = "distributionLists";
const IMAGE_FORMAT: &str = "imageFormat";
const IMAGE_FORMAT_AVATAR: &str = "avatar";
const IMAGE_FORMAT_THUMBNAIL: &str = "thumbnail";
const MDM: &str = "mdm";

fn mdm(restrictions: &MdmRestrictions) -> MsgpackObjectBuilder {
    MsgpackObjectBuilder::new()
        .maybe_put("readonlyProfile", restrictions.readonly_profile)
        .maybe_put("disableAddContact", restrictions.disable_add_contact)
        .maybe_put("disableCreateGroup", restrictions.disable_create_group)
        .maybe_put("disableSaveToGallery", restrictions.disable_save_to_gallery)
        .maybe_put("disableExport", restrictions.disable_export)
        .maybe_put("disableMessagePreview", restrictions.disable_message_preview)
        .maybe_put("disableCalls", restrictions.disable_calls)
}

pub fn convert(ctx: &ConversionContext<'_>) -> Result<MsgpackObjectBuilder> {
    let services = &ctx.services;
    let device = services.device.device_info()?;
    let preferences = services.preferences;

    let configuration = MsgpackObjectBuilder::new()
        .put(VOIP_ENABLED, preferences.voip_enabled()?)
        .put(VOIP_FORCE_TURN, preferences.voip_force_turn()?)
        .put(LARGE_SINGLE_EMOJI, preferences.large_single_emoji()?)
        .put(SHOW_INACTIVE_IDS, preferences.show_inactive_ids()?);

    let image_format = MsgpackObjectBuilder::new()
        .put(IMAGE_FORMAT_AVATAR, protocol::FORMAT_AVATAR.to_mime_type())
        .put(IMAGE_FORMAT_THUMBNAIL, protocol::FORMAT_THUMBNAIL.to_mime_type());
    let restrictions = services.device.mdm_restrictions()?;
    let capabilities = MsgpackObjectBuilder::new()
        .put(MAX_GROUP_SIZE, protocol::MAX_GROUP_SIZE)
        .put(MAX_FILE_SIZE, protocol::MAX_FILE_SIZE)
        .put(DISTRIBUTION_LISTS, true)
        .put(IMAGE_FORMAT, image_format)
        .maybe_put(MDM, (!restrictions.is_empty()).then(|| mdm(&restrictions)));

    Ok(MsgpackObjectBuilder::new()
        .put(DEVICE, device.device)
        .put(OS, device.os)
        .put(OS_VERSION, device.os_version)
        .put(APP_VERSION, device.app_version)
        .put(IS_WORK, ctx.config.work_build)
        .maybe_put(PUSH_TOKEN, device.push_token)
        .put(CONFIGURATION, configuration)
        .put(CAPABILITIES, capabilities))
}
