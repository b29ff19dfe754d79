use dbot_core::Member;

/// True if the member is an administrator or holds a role named in `whitelist_roles`.
/// Role names compare exactly (case-sensitive), matching how the platform displays them.
pub fn is_exempt(member: &Member, whitelist_roles: &[String]) -> bool {
    if member.is_admin {
        return true;
    }
    member
        .role_names
        .iter()
        .any(|role| whitelist_roles.iter().any(|allowed| allowed == role))
}
