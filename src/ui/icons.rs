pub struct Icons;

impl Icons {
    pub const DATABASE: &str = "🗄️";
    pub const BROOM: &str = "🧹";
    pub const STATS: &str = "📊";
    pub const EYE: &str = "👀";
    pub const CROSS: &str = "❌";
}
