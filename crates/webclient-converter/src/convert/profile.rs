use crate::builder::MsgpackObjectBuilder;
use crate::error::{ConversionError, Result};
use crate::imaging;
use crate::protocol;
use crate::services::ConversionContext;

use super::contact::non_empty;

const IDENTITY: &str = "identity";
const PUBLIC_KEY: &str = "publicKey";
const PUBLIC_NICKNAME: &str = "publicNickname";
const AVATAR: &str = "avatar";

/// The own profile. The high resolution avatar is embedded unscaled on request.
pub fn convert(ctx: &ConversionContext<'_>, include_avatar: bool) -> Result<MsgpackObjectBuilder> {
    let user = ctx.services.user;
    let profile = user.profile()?;
    let avatar = if include_avatar { user.avatar(true)? } else { None };
    let avatar = avatar
        .map(|bitmap| {
            imaging::encode(&bitmap, protocol::FORMAT_AVATAR, 100)
                .map_err(|err| ConversionError::new(format!("avatar encoding failed: {err}")))
        })
        .transpose()?;

    Ok(MsgpackObjectBuilder::new()
        .put(IDENTITY, profile.identity)
        .put(PUBLIC_KEY, profile.public_key)
        .maybe_put(PUBLIC_NICKNAME, non_empty(profile.public_nickname.as_deref()))
        .maybe_put(AVATAR, avatar))
}
