//! Distribution list projection.

use crate::builder::{MsgpackArrayBuilder, MsgpackBuilder, MsgpackObjectBuilder};
use crate::error::Result;
use crate::model::DistributionListModel;
use crate::services::ConversionContext;

use super::contact::non_empty;
use super::receiver::{self, ModelWrapper, ACCESS, CAN_DELETE, COLOR, DISPLAY_NAME, ID};

const MEMBERS: &str = "members";
const CREATED_AT: &str = "createdAt";
const CAN_CHANGE_MEMBERS: &str = "canChangeMembers";

pub fn convert(
    ctx: &ConversionContext<'_>,
    list: &DistributionListModel,
) -> Result<MsgpackObjectBuilder> {
    let members = ctx.services.distribution_lists.member_identities(list)?;
    let display_name = match non_empty(list.name.as_deref()) {
        Some(name) => name.to_owned(),
        None => members.join(", "),
    };
    let unique_id = ModelWrapper::DistributionList(list.clone()).unique_id();

    let builder = MsgpackObjectBuilder::new()
        .put(ID, list.id.to_string())
        .put(DISPLAY_NAME, display_name)
        .put(COLOR, receiver::color_hex(list.color_light))
        .put(MEMBERS, members.into_iter().collect::<MsgpackArrayBuilder>())
        .maybe_put(CREATED_AT, list.created_at.map(|ms| ms / 1000));
    let builder = receiver::put_visibility(ctx, builder, &unique_id)?;
    let access = MsgpackObjectBuilder::new()
        .put(CAN_DELETE, true)
        .put(CAN_CHANGE_MEMBERS, true);
    Ok(builder.put(ACCESS, access))
}

pub fn convert_all(
    ctx: &ConversionContext<'_>,
    lists: &[DistributionListModel],
) -> Result<Vec<MsgpackBuilder>> {
    lists
        .iter()
        .map(|list| convert(ctx, list).map(MsgpackBuilder::from))
        .collect()
}

pub fn arguments(list: &DistributionListModel) -> MsgpackObjectBuilder {
    MsgpackObjectBuilder::new().put(ID, list.id.to_string())
}
