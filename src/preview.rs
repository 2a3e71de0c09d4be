use crate::plan::{Action, Plan};
use colored::Colorize;
use indexmap::IndexMap;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Represents a node in the tree (either file or directory).
#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<Rc<RefCell<TreeNode>>>,
    is_file: bool,
    /// `None` for directories that already exist and only give structure to the tree.
    action: Option<Action>,
}
impl TreeNode {
    fn new(name: String, is_file: bool) -> Self {
        Self {
            name,
            children: Vec::new(),
            is_file,
            action: None,
        }
    }
}

/// Returns the node for `path`, creating it and any missing ancestors.
fn node_for(
    lookup: &mut IndexMap<PathBuf, Rc<RefCell<TreeNode>>>,
    path: &Path,
    is_file: bool,
) -> Rc<RefCell<TreeNode>> {
    if let Some(node) = lookup.get(path) {
        return Rc::clone(node);
    }

    let parent_path = path.parent().unwrap_or_else(|| Path::new(""));
    let parent = node_for(lookup, parent_path, false);

    let name = path
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    let child = Rc::new(RefCell::new(TreeNode::new(name, is_file)));

    parent.borrow_mut().children.push(Rc::clone(&child));
    lookup.insert(path.to_path_buf(), Rc::clone(&child));

    child
}

/// Build the directory tree from the plan entries, returning the root node.
fn build_tree(plan: &Plan, root: &Path) -> Rc<RefCell<TreeNode>> {
    let root_name = root
        .file_name()
        .map(|os| os.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());

    let root_node = Rc::new(RefCell::new(TreeNode::new(root_name, false)));

    // plan paths are relative, so the root is keyed by the empty path
    let mut lookup: IndexMap<PathBuf, Rc<RefCell<TreeNode>>> = IndexMap::new();
    lookup.insert(PathBuf::new(), Rc::clone(&root_node));

    for entry in &plan.entries {
        let node = node_for(&mut lookup, &entry.path, entry.is_file);
        node.borrow_mut().action = Some(entry.action);
    }

    root_node
}

fn render_node(node: &Rc<RefCell<TreeNode>>, prefix: &str, is_last: bool, out: &mut String) {
    let node_borrow = node.borrow();

    let connector = if is_last {
        "└── ".yellow()
    } else {
        "├── ".yellow()
    };
    let name = match (node_borrow.is_file, node_borrow.action) {
        (_, Some(Action::CreateFile)) => node_borrow.name.green(),
        (_, Some(Action::CreateDirectory)) => node_borrow.name.blue().bold(),
        (_, Some(Action::Keep)) => format!("{} (exists)", node_borrow.name).dimmed(),
        (true, None) => node_borrow.name.normal(),
        (false, None) => node_borrow.name.blue(),
    };
    out.push_str(&format!("{}{}{}\n", prefix.yellow(), connector, name));

    let child_prefix = if is_last {
        format!("{}    ", prefix)
    } else {
        format!("{}│   ", prefix)
    };

    let len = node_borrow.children.len();
    for (i, child) in node_borrow.children.iter().enumerate() {
        render_node(child, &child_prefix, i == len - 1, out);
    }
}

/// Renders `plan` as an ASCII tree rooted at `root`.
pub fn render(plan: &Plan, root: &Path) -> String {
    let tree_root = build_tree(plan, root);
    let mut out = String::new();

    render_node(&tree_root, "", true, &mut out);

    out
}

pub fn preview_as_tree(plan: &Plan, root: &Path) {
    println!(
        "Legend: {} = (new directory), {} = (new file), {} = (untouched)",
        "blue".blue().bold(),
        "green".green(),
        "dimmed".dimmed()
    );

    let fancy_prompt = format!(
        "{} {}\n",
        "┌─".bold().bright_blue(),
        "Preview".bold().bright_blue(),
    );

    println!("{}", fancy_prompt);

    print!("{}", render(plan, root));

    let summary = if plan.is_noop() {
        "Nothing to create".to_string()
    } else {
        format!(
            "{} directories and {} files would be created",
            plan.count(Action::CreateDirectory),
            plan.count(Action::CreateFile)
        )
    };

    println!(
        "\n{} {}\n",
        "└─".bold().bright_blue(),
        summary.bright_green()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlannedEntry;

    fn planned(path: &str, is_file: bool, action: Action) -> PlannedEntry {
        PlannedEntry {
            path: PathBuf::from(path),
            is_file,
            action,
        }
    }

    #[test]
    fn test_render_tree_shape() {
        colored::control::set_override(false);

        let plan = Plan {
            entries: vec![
                planned("src", false, Action::CreateDirectory),
                planned("src/__init__.py", true, Action::CreateFile),
                planned("config/config.yaml", true, Action::Keep),
                planned("app.py", true, Action::CreateFile),
            ],
        };

        let rendered = render(&plan, Path::new("project"));

        let expected = "\
└── project
    ├── src
    │   └── __init__.py
    ├── config
    │   └── config.yaml (exists)
    └── app.py
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_plan_is_just_the_root() {
        colored::control::set_override(false);

        let rendered = render(&Plan::default(), Path::new("/tmp/project"));

        assert_eq!(rendered, "└── project\n");
    }
}
