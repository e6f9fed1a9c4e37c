//! Viewer configuration
//!
//! The only user-facing input is an optional object count on the command
//! line. It is parsed the way C's `atoi` would: leading whitespace, an
//! optional sign and as many decimal digits as follow. Anything that does
//! not start with a number becomes zero. A couple of environment variables
//! tune the rest.

/// Environment variable holding a `u64` seed for the scene generator
pub const SEED_VAR: &str = "HIGHLIGHT_PICK_SEED";

/// Environment variable that starts the viewer in assembly-parts pick mode
pub const PARTS_VAR: &str = "HIGHLIGHT_PICK_PARTS";

/// Number of spheres (and cubes) generated when no count is given
pub const DEFAULT_OBJECT_COUNT: usize = 3;

/// Which actors are eligible when the user clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickMode {
    /// Every visible, pickable actor in the scene
    #[default]
    Scene,
    /// Only the members of the cube assembly
    AssemblyParts,
}

impl PickMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            PickMode::Scene => PickMode::AssemblyParts,
            PickMode::AssemblyParts => PickMode::Scene,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Number of spheres, and of cubes in the assembly
    pub object_count: usize,
    pub window_title: String,
    /// Logical window size
    pub window_size: (u32, u32),
    /// Clear color (RGB)
    pub background: [f32; 3],
    pub pick_mode: PickMode,
    /// Fixed RNG seed; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            object_count: DEFAULT_OBJECT_COUNT,
            window_title: "Highlight Picked Actor".to_string(),
            window_size: (640, 480),
            background: [0.3, 0.4, 0.5],
            pick_mode: PickMode::Scene,
            seed: None,
        }
    }
}

impl ViewerConfig {
    /// Reads the process arguments and environment.
    pub fn from_env() -> Self {
        Self::from_args_and_vars(std::env::args().skip(1), |name| std::env::var(name).ok())
    }

    /// Builds a config from positional arguments (program name already
    /// stripped) and a variable lookup.
    pub fn from_args_and_vars<I, F>(args: I, lookup: F) -> Self
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(arg) = args.into_iter().next() {
            // Negative counts build nothing
            config.object_count = usize::try_from(parse_count(&arg)).unwrap_or(0);
        }

        if let Some(raw) = lookup(SEED_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(err) => log::warn!("ignoring {SEED_VAR}={raw:?}: {err}"),
            }
        }

        if lookup(PARTS_VAR).is_some_and(|v| is_truthy(&v)) {
            config.pick_mode = PickMode::AssemblyParts;
        }

        config
    }
}

/// `atoi`-style integer parse. Overflow saturates instead of being undefined.
pub fn parse_count(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(byte - b'0'));
    }

    if negative {
        -value
    } else {
        value
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
