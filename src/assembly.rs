//! Genome assemblies and the liftover directions between them.

use std::str::FromStr;

/// The UCSC location from which chain files are downloaded.
pub const CHAIN_FILE_URL_PREFIX: &str = "https://hgdownload.soe.ucsc.edu/goldenPath";

/// The suffix UCSC appends to every liftover chain file name.
pub const CHAIN_FILE_SUFFIX: &str = ".over.chain.gz";

/// Every supported direction alongside its `(source, target)` assemblies.
pub const DIRECTIONS: [(Direction, Assembly, Assembly); 2] = [
    (Direction::Hg19ToHg38, Assembly::Hg19, Assembly::Hg38),
    (Direction::Hg38ToHg19, Assembly::Hg38, Assembly::Hg19),
];

////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////

/// An error related to parsing an [`Assembly`] or a [`Direction`].
#[derive(Debug, Eq, PartialEq)]
pub enum ParseError {
    /// An unknown assembly name.
    UnknownAssembly(String),

    /// An unknown direction name.
    UnknownDirection(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownAssembly(value) => write!(
                f,
                "unknown assembly `{value}`: expected one of {}",
                choices(Assembly::all().iter())
            ),
            ParseError::UnknownDirection(value) => write!(
                f,
                "unknown direction `{value}`: expected one of {}",
                choices(DIRECTIONS.iter().map(|(direction, _, _)| direction))
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Formats a list of choices for an error message.
fn choices<T: std::fmt::Display>(values: impl Iterator<Item = T>) -> String {
    values
        .map(|value| format!("`{value}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

////////////////////////////////////////////////////////////////////////////////////////
// Assembly
////////////////////////////////////////////////////////////////////////////////////////

/// A reference genome assembly.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Assembly {
    /// GRCh37, as named by UCSC.
    Hg19,

    /// GRCh38, as named by UCSC.
    Hg38,
}

impl Assembly {
    /// Every supported assembly.
    pub fn all() -> &'static [Assembly] {
        &[Assembly::Hg19, Assembly::Hg38]
    }

    /// Gets the UCSC name of the assembly.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::Assembly;
    ///
    /// assert_eq!(Assembly::Hg19.name(), "hg19");
    /// assert_eq!(Assembly::Hg38.name(), "hg38");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Assembly::Hg19 => "hg19",
            Assembly::Hg38 => "hg38",
        }
    }

    /// Gets the name of the assembly as it appears after `To` in a UCSC chain
    /// name (e.g., `Hg38` in `hg19ToHg38`).
    fn capitalized_name(&self) -> &'static str {
        match self {
            Assembly::Hg19 => "Hg19",
            Assembly::Hg38 => "Hg38",
        }
    }
}

impl std::fmt::Display for Assembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Assembly {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Assembly::all()
            .iter()
            .find(|assembly| assembly.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| ParseError::UnknownAssembly(s.to_string()))
    }
}

////////////////////////////////////////////////////////////////////////////////////////
// Direction
////////////////////////////////////////////////////////////////////////////////////////

/// A direction in which to lift over coordinates.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "binaries", derive(clap::ValueEnum))]
pub enum Direction {
    /// From hg19 to hg38.
    #[cfg_attr(feature = "binaries", value(name = "hg19tohg38"))]
    Hg19ToHg38,

    /// From hg38 to hg19.
    #[cfg_attr(feature = "binaries", value(name = "hg38tohg19"))]
    Hg38ToHg19,
}

impl Direction {
    /// Gets the name of the direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::Direction;
    ///
    /// assert_eq!(Direction::Hg19ToHg38.name(), "hg19tohg38");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            Direction::Hg19ToHg38 => "hg19tohg38",
            Direction::Hg38ToHg19 => "hg38tohg19",
        }
    }

    /// Gets the `(source, target)` assemblies for this direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::Assembly;
    /// use bedlift::Direction;
    ///
    /// assert_eq!(
    ///     Direction::Hg38ToHg19.assemblies(),
    ///     (Assembly::Hg38, Assembly::Hg19)
    /// );
    /// ```
    pub fn assemblies(&self) -> (Assembly, Assembly) {
        match self {
            Direction::Hg19ToHg38 => (Assembly::Hg19, Assembly::Hg38),
            Direction::Hg38ToHg19 => (Assembly::Hg38, Assembly::Hg19),
        }
    }

    /// Gets the assembly coordinates are lifted over from.
    pub fn source(&self) -> Assembly {
        self.assemblies().0
    }

    /// Gets the assembly coordinates are lifted over to.
    pub fn target(&self) -> Assembly {
        self.assemblies().1
    }

    /// Gets the direction going the other way.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::Direction;
    ///
    /// assert_eq!(Direction::Hg19ToHg38.reverse(), Direction::Hg38ToHg19);
    /// ```
    pub fn reverse(&self) -> Direction {
        match self {
            Direction::Hg19ToHg38 => Direction::Hg38ToHg19,
            Direction::Hg38ToHg19 => Direction::Hg19ToHg38,
        }
    }

    /// Gets the UCSC chain name for this direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::Direction;
    ///
    /// assert_eq!(Direction::Hg19ToHg38.chain_name(), "hg19ToHg38");
    /// ```
    pub fn chain_name(&self) -> String {
        let (source, target) = self.assemblies();
        format!("{}To{}", source.name(), target.capitalized_name())
    }

    /// Gets the UCSC chain file name for this direction.
    pub fn chain_file_name(&self) -> String {
        format!("{}{}", self.chain_name(), CHAIN_FILE_SUFFIX)
    }

    /// Gets the UCSC download URL of the chain file for this direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use bedlift::Direction;
    ///
    /// assert_eq!(
    ///     Direction::Hg38ToHg19.download_url(),
    ///     "https://hgdownload.soe.ucsc.edu/goldenPath/hg38/liftOver/hg38ToHg19.over.chain.gz"
    /// );
    /// ```
    pub fn download_url(&self) -> String {
        format!(
            "{}/{}/liftOver/{}",
            CHAIN_FILE_URL_PREFIX,
            self.source().name(),
            self.chain_file_name()
        )
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Direction {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DIRECTIONS
            .iter()
            .map(|(direction, _, _)| *direction)
            .find(|direction| direction.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseError::UnknownDirection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions_are_reciprocal() {
        for (direction, source, target) in DIRECTIONS {
            assert_eq!(direction.source(), source);
            assert_eq!(direction.target(), target);
            assert_eq!(direction.reverse().source(), target);
            assert_eq!(direction.reverse().target(), source);
            assert_eq!(direction.reverse().reverse(), direction);
        }
    }

    #[test]
    fn parse_direction() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("hg19tohg38".parse::<Direction>()?, Direction::Hg19ToHg38);
        assert_eq!("hg38ToHg19".parse::<Direction>()?, Direction::Hg38ToHg19);

        let err = "hg19tohg18".parse::<Direction>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown direction `hg19tohg18`: expected one of `hg19tohg38`, `hg38tohg19`"
        );

        Ok(())
    }

    #[test]
    fn parse_assembly() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!("hg19".parse::<Assembly>()?, Assembly::Hg19);
        assert_eq!("HG38".parse::<Assembly>()?, Assembly::Hg38);

        let err = "mm10".parse::<Assembly>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown assembly `mm10`: expected one of `hg19`, `hg38`"
        );

        Ok(())
    }

    #[test]
    fn chain_files() {
        assert_eq!(Direction::Hg38ToHg19.chain_name(), "hg38ToHg19");
        assert_eq!(
            Direction::Hg19ToHg38.chain_file_name(),
            "hg19ToHg38.over.chain.gz"
        );
        assert_eq!(
            Direction::Hg19ToHg38.download_url(),
            "https://hgdownload.soe.ucsc.edu/goldenPath/hg19/liftOver/hg19ToHg38.over.chain.gz"
        );
    }

    #[test]
    fn display_round_trips() -> Result<(), Box<dyn std::error::Error>> {
        for (direction, _, _) in DIRECTIONS {
            assert_eq!(direction.to_string().parse::<Direction>()?, direction);
        }

        Ok(())
    }
}
