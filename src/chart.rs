use crate::aggregate::to_lacs;
use serde::Serialize;

/// An sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

pub const BLUE: Rgb = Rgb(31, 119, 180);
pub const ORANGE: Rgb = Rgb(255, 127, 14);
pub const GREEN: Rgb = Rgb(44, 160, 44);

/// Twenty-color categorical palette used for pie wedges.
pub const TAB20: [Rgb; 20] = [
    Rgb(31, 119, 180),
    Rgb(174, 199, 232),
    Rgb(255, 127, 14),
    Rgb(255, 187, 120),
    Rgb(44, 160, 44),
    Rgb(152, 223, 138),
    Rgb(214, 39, 40),
    Rgb(255, 152, 150),
    Rgb(148, 103, 189),
    Rgb(197, 176, 213),
    Rgb(140, 86, 75),
    Rgb(196, 156, 148),
    Rgb(227, 119, 194),
    Rgb(247, 182, 210),
    Rgb(127, 127, 127),
    Rgb(199, 199, 199),
    Rgb(188, 189, 34),
    Rgb(219, 219, 141),
    Rgb(23, 190, 207),
    Rgb(158, 218, 229),
];

/// Palette color for the group at `index`, cycling once the palette runs out.
pub fn palette_color(index: usize) -> Rgb {
    TAB20[index % TAB20.len()]
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: i64,
    /// Share of the metric total, in percent.
    pub share: f64,
    pub color: Rgb,
}

impl PieSlice {
    pub fn legend_label(&self) -> String {
        format!("{}: {:.1}%", self.label, self.share)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub legend_title: String,
    pub slices: Vec<PieSlice>,
}

/// Percentage share of each value in the sum of all values.
///
/// A zero total yields `0.0` for every entry instead of dividing by zero.
pub fn percentages(values: &[i64]) -> Vec<f64> {
    let total: i128 = values.iter().map(|v| *v as i128).sum();
    if total == 0 {
        return vec![0.0; values.len()];
    }
    values
        .iter()
        .map(|v| *v as f64 / total as f64 * 100.0)
        .collect()
}

/// Builds a pie chart with one slice per label, colored in group order.
pub fn pie_chart(
    title: impl Into<String>,
    legend_title: impl Into<String>,
    labels: &[String],
    values: &[i64],
) -> PieChart {
    let shares = percentages(values);
    let slices = labels
        .iter()
        .zip(values)
        .zip(shares)
        .enumerate()
        .map(|(i, ((label, value), share))| PieSlice {
            label: label.clone(),
            value: *value,
            share,
            color: palette_color(i),
        })
        .collect();

    PieChart {
        title: title.into(),
        legend_title: legend_title.into(),
        slices,
    }
}

/// One bar; `None` is a gap for a category without a numeric value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<Bar>,
    pub color: Rgb,
}

impl BarChart {
    pub fn values(&self) -> Vec<Option<f64>> {
        self.bars.iter().map(|b| b.value).collect()
    }
}

/// Bar chart of integer amounts displayed in Lacs.
pub fn lacs_bar_chart(
    title: impl Into<String>,
    x_label: impl Into<String>,
    y_label: impl Into<String>,
    labels: &[String],
    amounts: &[i64],
    color: Rgb,
) -> BarChart {
    let bars = labels
        .iter()
        .zip(amounts)
        .map(|(label, amount)| Bar {
            label: label.clone(),
            value: Some(to_lacs(*amount)),
        })
        .collect();

    BarChart {
        title: title.into(),
        x_label: x_label.into(),
        y_label: y_label.into(),
        bars,
        color,
    }
}

/// Either kind of chart a dashboard view can emit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Chart {
    Pie(PieChart),
    Bar(BarChart),
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Pie(pie) => &pie.title,
            Chart::Bar(bar) => &bar.title,
        }
    }
}
