use std::fmt;

/// Which chart axis a field (or label group) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// The numeric census attributes that can be bound to an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Poverty,
    Age,
    Income,
    Healthcare,
    Obesity,
    Smokes,
}

pub const FIELD_COUNT: usize = 6;

impl Field {
    pub const ALL: [Field; FIELD_COUNT] = [
        Field::Poverty,
        Field::Age,
        Field::Income,
        Field::Healthcare,
        Field::Obesity,
        Field::Smokes,
    ];

    pub const X_OPTIONS: [Field; 3] = [Field::Poverty, Field::Age, Field::Income];
    pub const Y_OPTIONS: [Field; 3] = [Field::Healthcare, Field::Obesity, Field::Smokes];

    /// Position of this field in a record's value array.
    pub fn index(self) -> usize {
        match self {
            Field::Poverty => 0,
            Field::Age => 1,
            Field::Income => 2,
            Field::Healthcare => 3,
            Field::Obesity => 4,
            Field::Smokes => 5,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Field::Poverty | Field::Age | Field::Income => Axis::X,
            Field::Healthcare | Field::Obesity | Field::Smokes => Axis::Y,
        }
    }

    /// Column header used by the CSV source.
    pub fn column(self) -> &'static str {
        match self {
            Field::Poverty => "poverty",
            Field::Age => "age",
            Field::Income => "income",
            Field::Healthcare => "healthcare",
            Field::Obesity => "obesity",
            Field::Smokes => "smokes",
        }
    }

    /// Text of the clickable axis label.
    pub fn label(self) -> &'static str {
        match self {
            Field::Poverty => "In Poverty (%)",
            Field::Age => "Age (Median)",
            Field::Income => "Household Income (Median)",
            Field::Healthcare => "Lacks Healthcare (%)",
            Field::Obesity => "Obesity (%)",
            Field::Smokes => "Smokes (%)",
        }
    }

    pub fn tooltip_prefix(self) -> &'static str {
        match self {
            Field::Poverty => "Poverty: ",
            Field::Age => "Age: ",
            Field::Income => "Income: $",
            Field::Healthcare => "Lacks Healthcare: ",
            Field::Obesity => "Obesity: ",
            Field::Smokes => "Smokes: ",
        }
    }

    pub fn tooltip_suffix(self) -> &'static str {
        match self {
            Field::Age | Field::Income => "",
            Field::Poverty | Field::Healthcare | Field::Obesity | Field::Smokes => "%",
        }
    }
}

impl Axis {
    /// Field selected on this axis when a chart is first built.
    pub fn default_field(self) -> Field {
        self.options()[0]
    }

    pub fn options(self) -> [Field; 3] {
        match self {
            Axis::X => Field::X_OPTIONS,
            Axis::Y => Field::Y_OPTIONS,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
