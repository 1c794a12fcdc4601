use super::role::Role;

#[derive(Debug, Clone)]
pub struct Profile {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String, // ⇔ profiles.created_at (TEXT, RFC 3339)
}

impl Profile {
    /// Name shown in greetings and reports, falling back like the dashboard does.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            "User"
        } else {
            &self.full_name
        }
    }
}
