//! Adapters from Discord (twilight) types to dbot_core types.

use chrono::{DateTime, Utc};
use dbot_core::{Chat, ChatKind, Member, Message, ToCoreMessage, ToCoreUser, User};
use twilight_cache_inmemory::DefaultInMemoryCache;
use twilight_model::channel::Message as DiscordMessage;
use twilight_model::guild::Permissions;
use twilight_model::id::marker::{ChannelMarker, GuildMarker, RoleMarker, UserMarker};
use twilight_model::id::Id;

/// Wraps a twilight User (plus the guild nickname, if any) for conversion to core [`User`].
pub struct DiscordUserWrapper<'a> {
    pub user: &'a twilight_model::user::User,
    pub nick: Option<&'a str>,
}

impl<'a> ToCoreUser for DiscordUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.user.id.get() as i64,
            username: Some(self.user.name.clone()),
            display_name: self
                .nick
                .map(str::to_string)
                .or_else(|| self.user.global_name.clone()),
            is_bot: self.user.bot,
        }
    }
}

/// Wraps a twilight Message with the author's resolved guild [`Member`] (None in DMs).
/// `in_thread` is set when the channel is a guild thread.
pub struct DiscordMessageWrapper<'a> {
    pub message: &'a DiscordMessage,
    pub member: Option<Member>,
    pub in_thread: bool,
}

/// Guild threads map to [`ChatKind::Other`]; only plain guild channels count as `Guild`.
pub fn chat_kind(in_guild: bool, in_thread: bool) -> ChatKind {
    match (in_guild, in_thread) {
        (false, _) => ChatKind::Direct,
        (true, false) => ChatKind::Guild,
        (true, true) => ChatKind::Other,
    }
}

/// True when the cached channel is a thread. Unknown channels are treated as plain channels.
pub fn is_thread_channel(cache: &DefaultInMemoryCache, channel_id: Id<ChannelMarker>) -> bool {
    cache
        .channel(channel_id)
        .map(|c| c.kind.is_thread())
        .unwrap_or(false)
}

impl<'a> ToCoreMessage for DiscordMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let msg = self.message;
        let nick = msg.member.as_ref().and_then(|m| m.nick.as_deref());
        let guild_id = msg.guild_id.map(|g| g.get() as i64);

        Message {
            id: msg.id.get().to_string(),
            user: DiscordUserWrapper {
                user: &msg.author,
                nick,
            }
            .to_core(),
            chat: Chat {
                id: msg.channel_id.get() as i64,
                guild_id,
                kind: chat_kind(guild_id.is_some(), self.in_thread),
            },
            member: self.member.clone(),
            content: msg.content.clone(),
            created_at: DateTime::from_timestamp_micros(msg.timestamp.as_micros())
                .unwrap_or_else(Utc::now),
        }
    }
}

/// Builds a core [`Member`] from role data: admin when the member owns the guild or any role
/// (including `@everyone`, passed as `base_permissions`) grants ADMINISTRATOR.
pub fn build_member(
    is_owner: bool,
    roles: &[(String, Permissions)],
    base_permissions: Permissions,
) -> Member {
    let is_admin = is_owner
        || base_permissions.contains(Permissions::ADMINISTRATOR)
        || roles
            .iter()
            .any(|(_, p)| p.contains(Permissions::ADMINISTRATOR));

    Member {
        is_admin,
        role_names: roles.iter().map(|(name, _)| name.clone()).collect(),
    }
}

/// Resolves role names and admin capability of a message author from the gateway cache.
/// Roles missing from the cache are skipped.
pub fn resolve_member(
    cache: &DefaultInMemoryCache,
    guild_id: Id<GuildMarker>,
    user_id: Id<UserMarker>,
    role_ids: &[Id<RoleMarker>],
) -> Member {
    let is_owner = cache
        .guild(guild_id)
        .map(|g| g.owner_id() == user_id)
        .unwrap_or(false);

    let base_permissions = cache
        .role(guild_id.cast::<RoleMarker>())
        .map(|r| r.resource().permissions)
        .unwrap_or_else(Permissions::empty);

    let roles: Vec<(String, Permissions)> = role_ids
        .iter()
        .filter_map(|id| cache.role(*id))
        .map(|r| {
            let role = r.resource();
            (role.name.clone(), role.permissions)
        })
        .collect();

    build_member(is_owner, &roles, base_permissions)
}
