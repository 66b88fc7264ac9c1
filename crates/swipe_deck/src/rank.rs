/// Formula-driven look of a card below the top of the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankStyle {
    pub scale: f32,
    /// Downward shift in screen pixels, so lower cards peek out below.
    pub offset_y: f32,
    pub opacity: f32,
}

impl RankStyle {
    pub const TOP: Self = Self {
        scale: 1.0,
        offset_y: 0.0,
        opacity: 1.0,
    };
}

const RANK_TABLE: [RankStyle; 3] = [
    RankStyle::TOP,
    RankStyle {
        scale: 0.95,
        offset_y: 12.0,
        opacity: 0.9,
    },
    RankStyle {
        scale: 0.9,
        offset_y: 24.0,
        opacity: 0.75,
    },
];

/// Cards deeper than the table sit behind the last entry, fully transparent.
const BEYOND_TABLE: RankStyle = RankStyle {
    scale: 0.85,
    offset_y: 36.0,
    opacity: 0.0,
};

pub fn rank_style(rank: usize) -> RankStyle {
    RANK_TABLE.get(rank).copied().unwrap_or(BEYOND_TABLE)
}
