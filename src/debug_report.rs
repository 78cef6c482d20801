use deprewrite::extract::get_triples;
use deprewrite::split::{decompose_into_clauses, split_at_commas};
use deprewrite::{MergeMetrics, Options, SentenceTree, merge_all_with_metrics};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(tree: &SentenceTree, options: &Options, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Sentence: \"{}\"", tree.text()), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Input tree ━━━", ansi::GRAY));
    print_tree(tree, &palette);

    let run = merge_all_with_metrics(tree, &options.merge);

    println!("\n{}", palette.paint("━━━ Merge steps ━━━", ansi::GRAY));
    print_steps(&run.metrics, &palette);

    println!("\n{}", palette.paint("━━━ Merged tree ━━━", ansi::GRAY));
    print_tree(&run.tree, &palette);

    println!("\n{}", palette.paint("━━━ Triples ━━━", ansi::GRAY));
    let triples = get_triples(&run.tree);
    if triples.is_empty() {
        println!("{}", palette.dim("  No verbs found"));
    }
    for (idx, triple) in triples.iter().enumerate() {
        let subject = triple.subject.map_or_else(|| palette.dim("∅"), |s| palette.paint(s.text(), ansi::GREEN));
        let objects: Vec<String> = triple.objects.iter().map(|o| o.text().to_string()).collect();
        println!(
            "  {} {} {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            subject,
            palette.dim("│"),
            palette.bold(palette.paint(triple.predicate.text(), ansi::BLUE)),
            palette.dim("│"),
            palette.paint(format!("{objects:?}"), ansi::YELLOW),
        );
    }

    println!("\n{}", palette.paint("━━━ Clauses ━━━", ansi::GRAY));
    for fragment in decompose_into_clauses(tree, &options.split) {
        let painted = if fragment.contains(&options.split.mask_token) {
            palette.paint(&fragment, ansi::YELLOW)
        } else {
            fragment
        };
        println!("  {painted}");
    }

    println!("\n{}", palette.paint("━━━ Comma segments ━━━", ansi::GRAY));
    for span in split_at_commas(&run.tree) {
        println!("  {} {}", palette.paint(span.to_string(), ansi::YELLOW), run.tree.surface(span.start, span.end));
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Merged spans: {}  │  Tokens: {} → {}",
        palette.paint(format!("{:?}", run.metrics.total), ansi::GREEN),
        palette.paint(run.metrics.merged_spans().to_string(), ansi::CYAN),
        palette.dim(tree.len().to_string()),
        palette.dim(run.tree.len().to_string()),
    );
    println!();
}

fn print_tree(tree: &SentenceTree, palette: &ansi::Palette) {
    for line in tree.tree_view().lines() {
        println!("  {}", palette.dim(line));
    }
}

fn print_steps(metrics: &MergeMetrics, palette: &ansi::Palette) {
    if metrics.steps.is_empty() {
        println!("{}", palette.dim("  No merge steps enabled"));
        return;
    }
    for step in &metrics.steps {
        let outcome = if step.skipped {
            palette.dim("skipped")
        } else if step.accepted > 0 {
            palette.paint(format!("✓ {} of {} spans", step.accepted, step.candidates), ansi::GREEN)
        } else {
            palette.dim(format!("✗ 0 of {} spans", step.candidates))
        };
        println!(
            "  {} {}  {} {}",
            palette.paint(format!("{:<18}", step.rule), ansi::BLUE),
            outcome,
            palette.dim(format!("{} → {} tokens", step.tokens_before, step.tokens_after)),
            palette.dim(format!("{:?}", step.duration)),
        );
    }
}
