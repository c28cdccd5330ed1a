use ambient::{environment_value, Environment, Resolution, Scope, ValueSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    Blue,
    Red,
    Green,
}

#[derive(Debug, Clone, PartialEq)]
struct Style {
    color: Color,
}

impl Default for Style {
    fn default() -> Self {
        Style { color: Color::Blue }
    }
}

environment_value!(Style);

#[derive(Debug, Clone, PartialEq)]
struct Size {
    value: u32,
}

environment_value!(Size => Size { value: 10 });

#[test]
fn test_fresh_root_reads_default() {
    let root = Scope::root();
    assert_eq!(root.get::<Style>(), Style { color: Color::Blue });
}

#[test]
fn test_injected_style_visible_below_only() {
    let root = Scope::root();
    let red = root.inject(Style { color: Color::Red });

    assert_eq!(red.get::<Style>(), Style { color: Color::Red });
    assert_eq!(root.get::<Style>(), Style { color: Color::Blue });
}

#[test]
fn test_two_types_at_different_depths() {
    let root = Scope::root();
    let page = root.inject(Style { color: Color::Red });
    let section = page.inject(Size { value: 24 });
    let leaf = section.extend(Environment::new());

    assert_eq!(leaf.get::<Style>(), Style { color: Color::Red });
    assert_eq!(leaf.get::<Size>(), Size { value: 24 });

    // Each override is invisible above the point it was introduced.
    assert_eq!(page.get::<Size>(), Size { value: 10 });
    assert_eq!(root.get::<Style>(), Style { color: Color::Blue });
}

#[test]
fn test_shadowing_leaves_outer_scope_alone() {
    let root = Scope::root();
    let outer = root.inject(Style { color: Color::Red });
    let inner = outer.inject(Style { color: Color::Green });

    assert_eq!(inner.get::<Style>().color, Color::Green);
    assert_eq!(outer.get::<Style>().color, Color::Red);
    assert_eq!(inner.resolution::<Style>(), Resolution::Local);
    assert_eq!(
        inner.inject(Size { value: 1 }).resolution::<Style>(),
        Resolution::Inherited { distance: 1 }
    );
}

#[test]
fn test_registration_order_does_not_matter() {
    // Unrelated types resolve the same whichever is injected first.
    let a = Scope::root().inject(Size { value: 1 }).inject(Style { color: Color::Red });
    let b = Scope::root().inject(Style { color: Color::Red }).inject(Size { value: 1 });

    assert_eq!(a.get::<Style>(), b.get::<Style>());
    assert_eq!(a.get::<Size>(), b.get::<Size>());
}

/// A stand-in for the hierarchy that owns the scopes: each node may
/// override values for its subtree and records what it sees.
struct Node {
    name: &'static str,
    overrides: Environment,
    children: Vec<Node>,
}

fn visit(node: &Node, scope: &Scope, seen: &mut Vec<(&'static str, Color, u32)>) {
    let scope = if node.overrides.is_empty() {
        scope.clone()
    } else {
        scope.extend(node.overrides.clone())
    };
    seen.push((node.name, scope.get::<Style>().color, scope.get::<Size>().value));
    for child in &node.children {
        visit(child, &scope, seen);
    }
}

#[test]
fn test_traversal_threads_scopes() {
    let tree = Node {
        name: "app",
        overrides: Environment::new(),
        children: vec![
            Node {
                name: "sidebar",
                overrides: Environment::new().set(Style { color: Color::Green }),
                children: vec![Node {
                    name: "menu",
                    overrides: Environment::new().set(Size { value: 12 }),
                    children: vec![],
                }],
            },
            Node {
                name: "content",
                overrides: Environment::new(),
                children: vec![],
            },
        ],
    };

    let mut seen = Vec::new();
    visit(&tree, &Scope::root(), &mut seen);

    assert_eq!(
        seen,
        vec![
            ("app", Color::Blue, 10),
            ("sidebar", Color::Green, 10),
            ("menu", Color::Green, 12),
            ("content", Color::Blue, 10),
        ]
    );
}

fn read_through<S: ValueSource>(source: S) -> (Style, Size) {
    (source.get(), source.get())
}

#[test]
fn test_generic_readers() {
    let env = Environment::new().set(Size { value: 3 });
    let scope = Scope::from_environment(env.clone()).inject(Style { color: Color::Red });

    assert_eq!(read_through(&env), (Style::default(), Size { value: 3 }));
    assert_eq!(
        read_through(&scope),
        (Style { color: Color::Red }, Size { value: 3 })
    );
}

#[test]
fn test_shared_scope_across_threads() {
    let root = Scope::root().inject(Style { color: Color::Red });

    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            let parent = root.clone();
            std::thread::spawn(move || {
                let mine = parent.inject(Size { value: i });
                (mine.get::<Style>().color, mine.get::<Size>().value)
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), (Color::Red, i as u32));
    }
    assert_eq!(root.get::<Size>().value, 10);
}
