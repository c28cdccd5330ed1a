//! Walk a small view tree, letting branches restyle their subtrees.
//!
//! Run with `RUST_LOG=trace cargo run -p ambient --example styled_tree` to see
//! each injection.

use ambient::{environment_value, Scope};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq)]
struct ViewStyle {
    color: &'static str,
}

environment_value!(ViewStyle => ViewStyle { color: "blue" });

#[derive(Debug, Clone, PartialEq)]
struct Indent(usize);

environment_value!(Indent => Indent(2));

enum View {
    Swatch(&'static str),
    Styled(ViewStyle, Vec<View>),
    Indented(usize, Vec<View>),
}

fn render(view: &View, scope: &Scope, level: usize, out: &mut String) {
    match view {
        View::Swatch(name) => {
            let indent = scope.get::<Indent>().0 * level;
            let style = scope.get::<ViewStyle>();
            out.push_str(&format!("{:indent$}{name}: {}\n", "", style.color));
        }
        View::Styled(style, children) => {
            let scope = scope.inject(style.clone());
            for child in children {
                render(child, &scope, level + 1, out);
            }
        }
        View::Indented(width, children) => {
            let scope = scope.inject(Indent(*width));
            for child in children {
                render(child, &scope, level + 1, out);
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let tree = View::Indented(
        4,
        vec![
            View::Swatch("plain"),
            View::Styled(
                ViewStyle { color: "red" },
                vec![
                    View::Swatch("warning"),
                    View::Styled(ViewStyle { color: "green" }, vec![View::Swatch("ok")]),
                ],
            ),
            View::Swatch("plain again"),
        ],
    );

    let mut out = String::new();
    render(&tree, &Scope::root(), 0, &mut out);
    print!("{out}");
}
