//! Reaction aggregation for both protocol generations.

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};

use crate::builder::{MsgpackArrayBuilder, MsgpackObjectBuilder};
use crate::model::{MessageState, ReactionEvent};

const REACTION: &str = "reaction";
const IDENTITIES: &str = "identities";
const ACK: &str = "ack";
const DEC: &str = "dec";

/// Emoji the legacy generation treats as acknowledge.
pub const ACK_EMOJI: &str = "\u{1f44d}";
/// Emoji the legacy generation treats as decline.
pub const DEC_EMOJI: &str = "\u{1f44e}";

/// All identities that reacted with one emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionBucket {
    pub reaction: String,
    pub identities: IndexSet<String>,
}

/// Groups events by emoji. Buckets and identities keep first-seen order.
pub fn aggregate(events: &[ReactionEvent]) -> Vec<ReactionBucket> {
    let mut buckets: IndexMap<&str, IndexSet<String>> = IndexMap::new();
    for event in events {
        buckets
            .entry(event.emoji_sequence.as_str())
            .or_default()
            .insert(event.sender_identity.clone());
    }
    buckets
        .into_iter()
        .map(|(reaction, identities)| ReactionBucket {
            reaction: reaction.to_owned(),
            identities,
        })
        .collect()
}

/// `[{reaction, identities}]`, empty when nobody reacted.
pub fn emoji_reactions(buckets: Vec<ReactionBucket>) -> MsgpackArrayBuilder {
    buckets
        .into_iter()
        .map(|bucket| {
            MsgpackObjectBuilder::new()
                .put(REACTION, bucket.reaction)
                .put(
                    IDENTITIES,
                    bucket.identities.into_iter().collect::<MsgpackArrayBuilder>(),
                )
        })
        .collect()
}

/// Acknowledging and declining identities of a group message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyReactions {
    pub ack: IndexSet<String>,
    pub dec: IndexSet<String>,
}

impl LegacyReactions {
    /// Collects stored member states first, then thumbs up/down events.
    /// An identity ends up in the bucket of its latest reaction.
    pub fn collect(member_states: &BTreeMap<String, MessageState>, events: &[ReactionEvent]) -> Self {
        let mut reactions = Self::default();
        for (identity, state) in member_states {
            match state {
                MessageState::UserAck => reactions.acknowledge(identity),
                MessageState::UserDec => reactions.decline(identity),
                _ => {}
            }
        }
        for event in events {
            match event.emoji_sequence.as_str() {
                ACK_EMOJI => reactions.acknowledge(&event.sender_identity),
                DEC_EMOJI => reactions.decline(&event.sender_identity),
                _ => {}
            }
        }
        reactions
    }

    fn acknowledge(&mut self, identity: &str) {
        self.dec.shift_remove(identity);
        self.ack.insert(identity.to_owned());
    }

    fn decline(&mut self, identity: &str) {
        self.ack.shift_remove(identity);
        self.dec.insert(identity.to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.ack.is_empty() && self.dec.is_empty()
    }

    pub fn into_builder(self) -> MsgpackObjectBuilder {
        MsgpackObjectBuilder::new()
            .put(ACK, self.ack.into_iter().collect::<MsgpackArrayBuilder>())
            .put(DEC, self.dec.into_iter().collect::<MsgpackArrayBuilder>())
    }
}

/// State implied by the latest thumbs up/down on a direct message.
pub fn legacy_state(events: &[ReactionEvent]) -> Option<MessageState> {
    events
        .iter()
        .filter_map(|event| match event.emoji_sequence.as_str() {
            ACK_EMOJI => Some((event.reacted_at, MessageState::UserAck)),
            DEC_EMOJI => Some((event.reacted_at, MessageState::UserDec)),
            _ => None,
        })
        .max_by_key(|(reacted_at, _)| *reacted_at)
        .map(|(_, state)| state)
}
