//! Tree view of hierarchical data files
//!
//! Renders groups and datasets with box-drawing connectors:
//!
//! ```text
//! ├── channel_a
//! │   ├── time (1000,)
//! │   └── volts (1000,)
//! └── meta (3, 2)
//! ```

use std::convert::Infallible;
use std::fmt::Write as _;
use std::io;

use thiserror::Error;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE_INDENT: &str = "│   ";
const SPACE_INDENT: &str = "    ";

/// What a node in the hierarchy is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Container of named members
    Group,

    /// Array leaf with its dimensions
    Dataset { shape: Vec<usize> },
}

/// Read access to a group/dataset hierarchy
pub trait Hierarchy: Sized {
    type Error;

    fn kind(&self) -> Result<NodeKind, Self::Error>;

    /// Named members in storage order (empty for datasets)
    fn members(&self) -> Result<Vec<(String, Self)>, Self::Error>;
}

/// Render the members of `root` as a tree, one line per node
pub fn render_tree<H: Hierarchy>(root: &H) -> Result<String, H::Error> {
    let mut out = String::new();
    walk(root, "", &mut |line| {
        out.push_str(line);
        out.push('\n');
    })?;
    Ok(out)
}

/// Stream the tree of `root` to `writer`
pub fn write_tree<H, W>(root: &H, writer: &mut W) -> Result<(), TreeWriteError<H::Error>>
where
    H: Hierarchy,
    H::Error: std::error::Error + 'static,
    W: io::Write,
{
    let mut io_error = None;
    walk(root, "", &mut |line| {
        if io_error.is_none() {
            if let Err(err) = writeln!(writer, "{}", line) {
                io_error = Some(err);
            }
        }
    })
    .map_err(TreeWriteError::Source)?;

    match io_error {
        Some(err) => Err(TreeWriteError::Io(err)),
        None => Ok(()),
    }
}

/// Print the tree of `root` to stdout
pub fn print_tree<H>(root: &H) -> Result<(), TreeWriteError<H::Error>>
where
    H: Hierarchy,
    H::Error: std::error::Error + 'static,
{
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_tree(root, &mut handle)
}

/// Failure while streaming a tree
#[derive(Error, Debug)]
pub enum TreeWriteError<E: std::error::Error + 'static> {
    /// The hierarchy could not be read
    #[error("failed to read hierarchy: {0}")]
    Source(#[source] E),

    #[error("failed to write tree: {0}")]
    Io(#[from] io::Error),
}

fn walk<H, F>(node: &H, prefix: &str, emit: &mut F) -> Result<(), H::Error>
where
    H: Hierarchy,
    F: FnMut(&str),
{
    let members = node.members()?;
    let count = members.len();

    for (index, (name, child)) in members.iter().enumerate() {
        let last = index + 1 == count;
        let connector = if last { LAST_BRANCH } else { BRANCH };

        match child.kind()? {
            NodeKind::Group => {
                emit(&format!("{}{}{}", prefix, connector, name));
                let indent = if last { SPACE_INDENT } else { PIPE_INDENT };
                walk(child, &format!("{}{}", prefix, indent), emit)?;
            }
            NodeKind::Dataset { shape } => {
                emit(&format!("{}{}{} {}", prefix, connector, name, format_shape(&shape)));
            }
        }
    }
    Ok(())
}

/// Format dimensions like a Python tuple: `()`, `(5,)`, `(3, 4)`
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [single] => format!("({},)", single),
        dims => {
            let mut out = String::from("(");
            for (i, dim) in dims.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}", dim);
            }
            out.push(')');
            out
        }
    }
}

/// In-memory hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    kind: NodeKind,
    members: Vec<(String, TreeNode)>,
}

impl TreeNode {
    pub fn group() -> Self {
        Self {
            kind: NodeKind::Group,
            members: Vec::new(),
        }
    }

    pub fn dataset(shape: impl Into<Vec<usize>>) -> Self {
        Self {
            kind: NodeKind::Dataset {
                shape: shape.into(),
            },
            members: Vec::new(),
        }
    }

    /// Add a named member (ignored on datasets)
    pub fn with_member(mut self, name: impl Into<String>, node: TreeNode) -> Self {
        if self.kind == NodeKind::Group {
            self.members.push((name.into(), node));
        }
        self
    }
}

impl Hierarchy for TreeNode {
    type Error = Infallible;

    fn kind(&self) -> Result<NodeKind, Infallible> {
        Ok(self.kind.clone())
    }

    fn members(&self) -> Result<Vec<(String, Self)>, Infallible> {
        Ok(self.members.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> TreeNode {
        TreeNode::group()
            .with_member(
                "channel_a",
                TreeNode::group()
                    .with_member("time", TreeNode::dataset([1000]))
                    .with_member("volts", TreeNode::dataset([1000])),
            )
            .with_member(
                "runs",
                TreeNode::group()
                    .with_member(
                        "run_1",
                        TreeNode::group().with_member("trace", TreeNode::dataset([4, 250])),
                    )
                    .with_member("scalar", TreeNode::dataset(Vec::new())),
            )
    }

    #[test]
    fn test_render_nested() {
        let tree = render_tree(&capture()).unwrap();
        let expected = "\
├── channel_a
│   ├── time (1000,)
│   └── volts (1000,)
└── runs
    ├── run_1
    │   └── trace (4, 250)
    └── scalar ()
";
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_empty_root() {
        assert_eq!(render_tree(&TreeNode::group()).unwrap(), "");
    }

    #[test]
    fn test_write_tree_matches_render() {
        let mut out = Vec::new();
        write_tree(&capture(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), render_tree(&capture()).unwrap());
    }

    #[derive(Error, Debug)]
    #[error("dataset {0} unreadable")]
    struct Unreadable(String);

    /// Group whose member listing always fails
    struct BrokenGroup;

    impl Hierarchy for BrokenGroup {
        type Error = Unreadable;

        fn kind(&self) -> Result<NodeKind, Unreadable> {
            Ok(NodeKind::Group)
        }

        fn members(&self) -> Result<Vec<(String, Self)>, Unreadable> {
            Err(Unreadable("/x".to_string()))
        }
    }

    #[test]
    fn test_write_tree_keeps_source_error() {
        let mut out = Vec::new();
        let err = write_tree(&BrokenGroup, &mut out).unwrap_err();

        assert!(matches!(err, TreeWriteError::Source(_)));
        assert_eq!(err.to_string(), "failed to read hierarchy: dataset /x unreadable");

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "dataset /x unreadable");
        assert!(out.is_empty());
    }

    #[test]
    fn test_print_tree() {
        assert!(print_tree(&capture()).is_ok());
        assert!(matches!(print_tree(&BrokenGroup), Err(TreeWriteError::Source(_))));
    }

    #[test]
    fn test_format_shape() {
        assert_eq!(format_shape(&[]), "()");
        assert_eq!(format_shape(&[7]), "(7,)");
        assert_eq!(format_shape(&[3, 4, 5]), "(3, 4, 5)");
    }

    #[test]
    fn test_dataset_has_no_members() {
        let node = TreeNode::dataset([2]).with_member("x", TreeNode::group());
        assert!(node.members().unwrap().is_empty());
    }
}
