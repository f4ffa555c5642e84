//! Column layouts shared by the text and grid sinks.

/// Default delimiter between text fields.
pub const FIELD_DELIMITER: &str = ",";

/// Default delimiter between tag values inside the tags field.
pub const TAG_DELIMITER: &str = "|";

/// Columns of a call-tree export (Node and Frame source types).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameTreeColumn {
    Function = 1,
    SelfDuration,
    SelfPercent,
    Total,
    TotalPercent,
    Path,
    Tags,
}

impl FrameTreeColumn {
    pub const ALL: [FrameTreeColumn; 7] = [
        Self::Function,
        Self::SelfDuration,
        Self::SelfPercent,
        Self::Total,
        Self::TotalPercent,
        Self::Path,
        Self::Tags,
    ];

    /// 1-based grid column.
    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    /// Header text in delimited exports.
    pub fn text_header(self) -> &'static str {
        match self {
            Self::Function => "FUNCTION",
            Self::SelfDuration => "SELFDURATION(MS)",
            Self::SelfPercent => "SELFPERCENT",
            Self::Total => "TOTAL(MS)",
            Self::TotalPercent => "TOTALPERCENT%",
            Self::Path => "PATH",
            Self::Tags => "TAGS",
        }
    }

    /// Header text in grid exports.
    pub fn grid_header(self) -> &'static str {
        match self {
            Self::SelfPercent => "SELFPERCENT%",
            other => other.text_header(),
        }
    }
}

/// Columns of an aggregated view export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameTableColumn {
    Function = 1,
    SelfDuration,
    SelfPercent,
    Total,
    Max,
    Count,
    Path,
}

impl FrameTableColumn {
    pub const ALL: [FrameTableColumn; 7] = [
        Self::Function,
        Self::SelfDuration,
        Self::SelfPercent,
        Self::Total,
        Self::Max,
        Self::Count,
        Self::Path,
    ];

    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn text_header(self) -> &'static str {
        match self {
            Self::Function => "FUNCTION",
            Self::SelfDuration => "SELFDURATION",
            Self::SelfPercent => "SELFPERCENT%",
            Self::Total => "TOTAL(MS)",
            Self::Max => "MAX(MS)",
            Self::Count => "COUNT",
            Self::Path => "PATH",
        }
    }

    pub fn grid_header(self) -> &'static str {
        match self {
            Self::SelfDuration => "SELFDURATION(MS)",
            other => other.text_header(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_are_one_based_and_contiguous() {
        for (i, col) in FrameTreeColumn::ALL.iter().enumerate() {
            assert_eq!(col.index(), i as u32 + 1);
        }
        for (i, col) in FrameTableColumn::ALL.iter().enumerate() {
            assert_eq!(col.index(), i as u32 + 1);
        }
    }

    #[test]
    fn test_text_headers() {
        let tree: Vec<_> = FrameTreeColumn::ALL.iter().map(|c| c.text_header()).collect();
        assert_eq!(tree.join(","), "FUNCTION,SELFDURATION(MS),SELFPERCENT,TOTAL(MS),TOTALPERCENT%,PATH,TAGS");

        let table: Vec<_> = FrameTableColumn::ALL.iter().map(|c| c.text_header()).collect();
        assert_eq!(table.join(","), "FUNCTION,SELFDURATION,SELFPERCENT%,TOTAL(MS),MAX(MS),COUNT,PATH");
    }
}
