//! Application Configuration
//!
//! Configuration for the Donation application layer.

/// Donation application configuration
#[derive(Debug, Clone)]
pub struct DonationConfig {
    /// Rows per page of the admin listing
    pub page_size: u32,
    /// Recent donations on the public home page and `/api/stats`
    pub recent_public: u32,
    /// Recently recorded donations on the admin dashboard
    pub recent_admin: u32,
    /// UTC offset (minutes) that defines "today" for the daily totals
    pub stats_utc_offset_minutes: i32,
}

impl Default for DonationConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            recent_public: 10,
            recent_admin: 5,
            stats_utc_offset_minutes: 0,
        }
    }
}
