use super::report::WasteClassification;

/// Outcome of the waste classifier: a material and a short educational note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub waste_type: WasteClassification,
    pub message: &'static str,
}

/// Results the simulated classifier chooses from
pub const CLASSIFICATIONS: [Classification; 6] = [
    Classification {
        waste_type: WasteClassification::Plastic,
        message: "This appears to be plastic waste - did you know it can take up to 1000 years to decompose? Please ensure it reaches a recycling facility!",
    },
    Classification {
        waste_type: WasteClassification::Organic,
        message: "This looks like organic waste - it can be composted to create nutrient-rich soil for plants. Consider composting at home!",
    },
    Classification {
        waste_type: WasteClassification::Paper,
        message: "This appears to be paper waste - it's highly recyclable! One ton of recycled paper saves 17 trees.",
    },
    Classification {
        waste_type: WasteClassification::Metal,
        message: "This looks like metal waste - metals are infinitely recyclable without losing quality. Please recycle!",
    },
    Classification {
        waste_type: WasteClassification::Glass,
        message: "This appears to be glass waste - glass can be recycled endlessly. Always dispose in designated bins!",
    },
    Classification {
        waste_type: WasteClassification::Mixed,
        message: "This appears to be mixed waste - proper segregation helps improve recycling rates significantly!",
    },
];
