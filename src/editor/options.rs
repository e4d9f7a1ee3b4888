use std::collections::HashMap;

pub const HEIGHT_MIN_CM: u32 = 140;
pub const HEIGHT_MAX_CM: u32 = 220;

// Fixed choice lists keyed by profile field name.
const BUILTIN: &[(&str, &[&str])] = &[
    (
        "bodyType",
        &["Slim", "Athletic", "Average", "Curvy", "Muscular", "A few extra pounds", "Plus size"],
    ),
    (
        "ethnicity",
        &[
            "Asian",
            "Black",
            "Hispanic / Latino",
            "Middle Eastern",
            "Native American",
            "Pacific Islander",
            "South Asian",
            "White",
            "Mixed",
            "Other",
        ],
    ),
    (
        "religion",
        &[
            "Agnostic",
            "Atheist",
            "Buddhist",
            "Christian",
            "Hindu",
            "Jewish",
            "Muslim",
            "Sikh",
            "Spiritual",
            "Other",
        ],
    ),
    ("smoking", &["Never", "Socially", "Regularly", "Trying to quit"]),
    ("drinking", &["Never", "Rarely", "Socially", "Regularly"]),
    ("cannabis", &["Never", "Sometimes", "Often"]),
    (
        "education",
        &["High school", "Trade school", "In college", "Bachelor's", "Master's", "PhD"],
    ),
    (
        "relationshipGoals",
        &[
            "Long-term relationship",
            "Long-term, open to short",
            "Short-term, open to long",
            "Short-term fun",
            "New friends",
            "Still figuring it out",
        ],
    ),
    (
        "maritalStatus",
        &["Single", "Divorced", "Separated", "Widowed"],
    ),
    ("children", &["None", "Have kids", "Have kids, living with me", "Have kids, not living with me"]),
    ("wantChildren", &["Want children", "Don't want children", "Open to children", "Not sure"]),
    ("pets", &["Dog", "Cat", "Both", "Other pets", "No pets", "Allergic"]),
    ("diet", &["Omnivore", "Vegetarian", "Vegan", "Pescatarian", "Halal", "Kosher", "Other"]),
    ("exercise", &["Every day", "Often", "Sometimes", "Never"]),
    (
        "zodiac",
        &[
            "Aries",
            "Taurus",
            "Gemini",
            "Cancer",
            "Leo",
            "Virgo",
            "Libra",
            "Scorpio",
            "Sagittarius",
            "Capricorn",
            "Aquarius",
            "Pisces",
        ],
    ),
    (
        "personalityType",
        &[
            "INTJ", "INTP", "ENTJ", "ENTP", "INFJ", "INFP", "ENFJ", "ENFP", "ISTJ", "ISFJ", "ESTJ",
            "ESFJ", "ISTP", "ISFP", "ESTP", "ESFP",
        ],
    ),
    (
        "communicationStyle",
        &["Big time texter", "Phone caller", "Video chatter", "Bad texter", "Better in person"],
    ),
    (
        "loveLanguage",
        &["Words of affirmation", "Quality time", "Acts of service", "Receiving gifts", "Physical touch"],
    ),
    ("sleepingHabits", &["Early bird", "Night owl", "In a spectrum"]),
    ("socialMedia", &["Influencer status", "Socially active", "Off the grid", "Passive scroller"]),
    (
        "politicalViews",
        &["Liberal", "Moderate", "Conservative", "Not political", "Other"],
    ),
    ("gender", &["Woman", "Man", "Non-binary", "Other"]),
    (
        "interestedIn",
        &["Women", "Men", "Everyone"],
    ),
    (
        "sexualOrientation",
        &["Straight", "Gay", "Lesbian", "Bisexual", "Asexual", "Pansexual", "Queer", "Questioning"],
    ),
    ("eyeColor", &["Brown", "Blue", "Green", "Hazel", "Gray", "Amber"]),
    ("hairColor", &["Black", "Brown", "Blonde", "Red", "Gray", "White", "Bald", "Other"]),
    (
        "livingSituation",
        &["Live alone", "With roommates", "With family", "With partner", "Other"],
    ),
    (
        "workStatus",
        &["Employed", "Self-employed", "Student", "Between jobs", "Retired"],
    ),
    (
        "income",
        &["Prefer not to say", "Under 25k", "25k-50k", "50k-100k", "100k-200k", "200k+"],
    ),
    (
        "travelFrequency",
        &["Rarely", "A few times a year", "Monthly", "Always on the road"],
    ),
    ("relocate", &["Willing to relocate", "Not willing to relocate", "Maybe"]),
    (
        "distance",
        &["5 km", "10 km", "25 km", "50 km", "100 km", "Anywhere"],
    ),
    ("firstDate", &["Coffee", "Drinks", "Dinner", "Walk", "Activity", "Video call"]),
];

/// Choice lists by field name. Built once at startup and shared by reference.
#[derive(Clone, Debug, Default)]
pub struct OptionsTable {
    entries: HashMap<String, Vec<String>>,
}

impl OptionsTable {
    pub fn builtin() -> Self {
        let mut entries: HashMap<String, Vec<String>> = BUILTIN
            .iter()
            .map(|(name, opts)| {
                (
                    name.to_string(),
                    opts.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        entries.insert("height".to_string(), height_options());
        Self { entries }
    }

    #[allow(dead_code)]
    pub fn from_entries(entries: HashMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    /// Entries in `overrides` replace entries of the same name.
    pub fn with_overrides(mut self, overrides: HashMap<String, Vec<String>>) -> Self {
        for (name, opts) in overrides {
            self.entries.insert(name, opts);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn height_options() -> Vec<String> {
    (HEIGHT_MIN_CM..=HEIGHT_MAX_CM)
        .map(|cm| format!("{cm} cm"))
        .collect()
}
