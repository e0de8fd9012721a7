use crossterm::style::{StyledContent, Stylize};
use std::io::Write;
use tabled::settings::object::{Columns, Object, Rows};
use tabled::{
    builder::Builder,
    settings::{Alignment, Color, Style, themes::Colorization},
};

use super::{COLUMNS, ResultReporter};
use crate::report::AggregatedResult;

/// Renders results as a console table.
pub struct TableReporter {
    /// Emit ANSI colors.
    pub colored: bool,
}

impl ResultReporter for TableReporter {
    fn print(&self, w: &mut dyn Write, results: &[AggregatedResult]) -> anyhow::Result<()> {
        if self.colored {
            writeln!(w, "{}", "Results".h1())?;
        } else {
            writeln!(w, "Results")?;
        }

        let header = COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        let rows = results.iter().map(|r| {
            vec![
                r.method.clone(),
                r.path.clone(),
                r.hits.to_string(),
                r.successes.to_string(),
                r.failures.to_string(),
                render_avg(r.avg_ms),
            ]
        });
        let mut table = Builder::from_iter(std::iter::once(header).chain(rows)).build();
        table
            .with(Style::modern())
            .modify(Columns::new(2..), Alignment::right())
            .modify(Rows::new(0..=0), Alignment::center());

        if self.colored {
            table
                .with(Colorization::exact([Color::BOLD], Rows::new(0..=0)))
                .with(Colorization::exact([Color::FG_GREEN], Rows::new(1..).intersect(Columns::new(3..=3))))
                .with(Colorization::exact([Color::FG_RED], Rows::new(1..).intersect(Columns::new(4..=4))));
        }

        writeln!(w, "{}", table)?;
        Ok(())
    }
}

fn render_avg(avg_ms: Option<f64>) -> String {
    match avg_ms {
        Some(v) => format!("{v:.2} ms"),
        None => "n/a".into(),
    }
}

trait ReportStyle {
    fn h1(&self) -> StyledContent<&str>;
}

impl<T: AsRef<str>> ReportStyle for T {
    fn h1(&self) -> StyledContent<&str> {
        self.as_ref().bold().underlined().yellow()
    }
}
