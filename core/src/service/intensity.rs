use crate::model::intensity::Intensity;

// Upper bound (inclusive) of each level, anything above the last is `Max`.
const CONTRIBUTION_RANGES: [(u32, Intensity); 4] = [
    (0, Intensity::None),
    (10, Intensity::Low),
    (20, Intensity::Medium),
    (30, Intensity::High),
];

pub fn classify(count: u32) -> Intensity {
    CONTRIBUTION_RANGES
        .iter()
        .find(|(limit, _)| count <= *limit)
        .map(|(_, intensity)| *intensity)
        .unwrap_or(Intensity::Max)
}
