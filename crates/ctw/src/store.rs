use std::collections::BTreeMap;

use serde_json::json;

use crate::CatalogError;
use crate::catalog_path::CatalogPathBuf;
use crate::handler::Handler;

pub struct LeafEntry {
    pub property: String,
    pub handler: Box<dyn Handler>,
}

pub enum CatalogNode {
    Category(BTreeMap<String, CatalogNode>),
    Leaf(LeafEntry),
}

impl CatalogNode {
    pub fn is_category(&self) -> bool {
        matches!(self, CatalogNode::Category(_))
    }

    pub fn children(&self) -> Option<&BTreeMap<String, CatalogNode>> {
        match self {
            CatalogNode::Category(children) => Some(children),
            CatalogNode::Leaf(_) => None,
        }
    }

    pub fn leaf(&self) -> Option<&LeafEntry> {
        match self {
            CatalogNode::Category(_) => None,
            CatalogNode::Leaf(entry) => Some(entry),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            CatalogNode::Category(children) => {
                let map: serde_json::Map<String, serde_json::Value> = children
                    .iter()
                    .map(|(name, node)| (name.clone(), node.to_json()))
                    .collect();
                serde_json::Value::Object(map)
            }
            CatalogNode::Leaf(entry) => json!({
                "type": entry.handler.type_name(),
                "property": entry.property,
            }),
        }
    }
}

/// The catalog tree. All mutation goes through `add_category` and `add_leaf`,
/// which is what keeps collision detection in one place.
pub struct CatalogStore {
    root: CatalogNode,
}

impl CatalogStore {
    pub fn new() -> CatalogStore {
        CatalogStore {
            root: CatalogNode::Category(BTreeMap::new()),
        }
    }

    fn validate_key(key: &str) -> Result<(), CatalogError> {
        if key.is_empty() || key.contains('/') {
            return Err(CatalogError::malformed_address(key));
        }
        Ok(())
    }

    // The root node is a category from construction onwards; nothing can
    // replace it.
    fn root_children_mut(&mut self) -> &mut BTreeMap<String, CatalogNode> {
        match &mut self.root {
            CatalogNode::Category(children) => children,
            CatalogNode::Leaf(_) => panic!("root node is always a category"),
        }
    }

    // Walks the whole path without mutating, so a colliding insert leaves the
    // store untouched. Err is the first leaf encountered on the path.
    fn check_insert_path(&self, address: &CatalogPathBuf) -> Result<(), CatalogError> {
        let mut cursor = &self.root;
        for segment in address.segments() {
            let children = match cursor {
                CatalogNode::Category(children) => children,
                CatalogNode::Leaf(_) => return Err(CatalogError::node_collision(address)),
            };
            match children.get(segment) {
                Some(node) => cursor = node,
                None => return Ok(()),
            }
        }
        match cursor {
            CatalogNode::Category(_) => Ok(()),
            CatalogNode::Leaf(_) => Err(CatalogError::node_collision(address)),
        }
    }

    /// Creates (or returns, when it already exists) the category named `name`
    /// under `parent`, auto-creating missing intermediate categories. Fails
    /// with `NodeCollision` when a leaf occupies any node on the path.
    pub fn add_category(
        &mut self,
        parent: &CatalogPathBuf,
        name: &str,
    ) -> Result<CatalogPathBuf, CatalogError> {
        Self::validate_key(name)?;
        let address = parent.join(name);
        self.check_insert_path(&address)?;

        let mut cursor = self.root_children_mut();
        for segment in address.segments() {
            let node = cursor
                .entry(segment.to_string())
                .or_insert_with(|| CatalogNode::Category(BTreeMap::new()));
            cursor = match node {
                CatalogNode::Category(children) => children,
                // check_insert_path rejected any leaf on the path
                CatalogNode::Leaf(_) => return Err(CatalogError::node_collision(&address)),
            };
        }
        Ok(address)
    }

    /// Inserts `handler` into the category at `category` under `key`. The key
    /// becomes the leaf's property. Any occupied key is a collision.
    pub fn add_leaf(
        &mut self,
        category: &CatalogPathBuf,
        key: &str,
        handler: Box<dyn Handler>,
    ) -> Result<(), CatalogError> {
        Self::validate_key(key)?;
        let children = match self.get_mut(category) {
            Ok(CatalogNode::Category(children)) => children,
            Ok(CatalogNode::Leaf(_)) | Err(_) => {
                return Err(CatalogError::category_not_found(category));
            }
        };
        if children.contains_key(key) {
            return Err(CatalogError::node_collision(&category.join(key)));
        }
        children.insert(
            key.to_string(),
            CatalogNode::Leaf(LeafEntry {
                property: key.to_string(),
                handler,
            }),
        );
        Ok(())
    }

    /// Traverses from the root; the empty address resolves to the root
    /// category itself.
    pub fn get(&self, address: &CatalogPathBuf) -> Result<&CatalogNode, CatalogError> {
        let mut cursor = &self.root;
        for segment in address.segments() {
            let children = match cursor {
                CatalogNode::Category(children) => children,
                CatalogNode::Leaf(_) => {
                    return Err(CatalogError::address_not_found(address, segment));
                }
            };
            cursor = children
                .get(segment)
                .ok_or_else(|| CatalogError::address_not_found(address, segment))?;
        }
        Ok(cursor)
    }

    fn get_mut(&mut self, address: &CatalogPathBuf) -> Result<&mut CatalogNode, CatalogError> {
        let mut cursor = &mut self.root;
        for segment in address.segments() {
            let children = match cursor {
                CatalogNode::Category(children) => children,
                CatalogNode::Leaf(_) => {
                    return Err(CatalogError::address_not_found(address, segment));
                }
            };
            cursor = children
                .get_mut(segment)
                .ok_or_else(|| CatalogError::address_not_found(address, segment))?;
        }
        Ok(cursor)
    }

    pub fn contains(&self, address: &CatalogPathBuf) -> bool {
        self.get(address).is_ok()
    }

    pub fn to_json(&self) -> serde_json::Value {
        self.root.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::collector::BuildCtx;
    use crate::error::InnerError;

    struct TestHandler {
        property: String,
    }

    impl TestHandler {
        fn boxed(property: &str) -> Box<dyn Handler> {
            Box::new(TestHandler {
                property: property.to_string(),
            })
        }
    }

    impl Handler for TestHandler {
        fn build(&mut self, _ctx: &mut BuildCtx<'_>) -> Result<(), CatalogError> {
            Ok(())
        }

        fn catalog_property(&self) -> &str {
            &self.property
        }

        fn type_name(&self) -> &str {
            "Test"
        }
    }

    #[test]
    fn test_add_category() {
        let mut store = CatalogStore::new();

        let address = store
            .add_category(&CatalogPathBuf::root(), "collector")
            .unwrap();
        assert_eq!(address, CatalogPathBuf::from("collector"));
        assert!(store.get(&address).unwrap().is_category());

        // Adding again is idempotent
        let again = store
            .add_category(&CatalogPathBuf::root(), "collector")
            .unwrap();
        assert_eq!(again, address);
    }

    #[test]
    fn test_add_category_creates_intermediates() {
        let mut store = CatalogStore::new();

        let deep = store
            .add_category(&CatalogPathBuf::from("a/b/c"), "d")
            .unwrap();
        assert_eq!(deep, CatalogPathBuf::from("a/b/c/d"));

        assert!(store.contains(&CatalogPathBuf::from("a")));
        assert!(store.contains(&CatalogPathBuf::from("a/b")));
        assert!(store.contains(&CatalogPathBuf::from("a/b/c")));
    }

    #[test]
    fn test_add_category_leaf_collision() {
        let mut store = CatalogStore::new();
        let category = store
            .add_category(&CatalogPathBuf::root(), "files")
            .unwrap();
        store
            .add_leaf(&category, "notes", TestHandler::boxed("notes"))
            .unwrap();

        // Directly on the leaf
        let error = store
            .add_category(&category, "notes")
            .err()
            .expect("Should be err");
        assert!(matches!(error.error, InnerError::NodeCollision { .. }));

        // Through the leaf; the store must be left unmodified
        let error = store
            .add_category(&CatalogPathBuf::from("files/notes"), "deeper")
            .err()
            .expect("Should be err");
        assert!(matches!(error.error, InnerError::NodeCollision { .. }));
        assert!(store.get(&CatalogPathBuf::from("files/notes")).unwrap().leaf().is_some());
        assert!(!store.contains(&CatalogPathBuf::from("files/notes/deeper")));
    }

    #[test]
    fn test_add_leaf() {
        let mut store = CatalogStore::new();
        let category = store
            .add_category(&CatalogPathBuf::root(), "files")
            .unwrap();

        store
            .add_leaf(&category, "wallpaper", TestHandler::boxed("wallpaper"))
            .unwrap();

        let node = store
            .get(&CatalogPathBuf::from("files/wallpaper"))
            .unwrap();
        let entry = node.leaf().expect("should be a leaf");
        assert_eq!(entry.property, "wallpaper");
        assert_eq!(entry.handler.type_name(), "Test");
    }

    #[test]
    fn test_add_leaf_category_not_found() {
        let mut store = CatalogStore::new();

        let error = store
            .add_leaf(
                &CatalogPathBuf::from("nonexistent"),
                "x",
                TestHandler::boxed("x"),
            )
            .err()
            .expect("Should be err");
        assert!(matches!(error.error, InnerError::CategoryNotFound { .. }));
    }

    #[test]
    fn test_add_leaf_under_leaf() {
        let mut store = CatalogStore::new();
        let category = store
            .add_category(&CatalogPathBuf::root(), "files")
            .unwrap();
        store
            .add_leaf(&category, "notes", TestHandler::boxed("notes"))
            .unwrap();

        // The parent is a leaf, not a category
        let error = store
            .add_leaf(
                &CatalogPathBuf::from("files/notes"),
                "inner",
                TestHandler::boxed("inner"),
            )
            .err()
            .expect("Should be err");
        assert!(matches!(error.error, InnerError::CategoryNotFound { .. }));
    }

    #[test]
    fn test_add_leaf_key_collision() {
        let mut store = CatalogStore::new();
        let category = store
            .add_category(&CatalogPathBuf::root(), "directories")
            .unwrap();

        store
            .add_leaf(&category, "theme", TestHandler::boxed("theme"))
            .unwrap();
        let error = store
            .add_leaf(&category, "theme", TestHandler::boxed("theme"))
            .err()
            .expect("Should be err");
        assert!(matches!(error.error, InnerError::NodeCollision { .. }));
    }

    #[test]
    fn test_get_root() {
        let store = CatalogStore::new();
        let root = store.get(&CatalogPathBuf::root()).unwrap();
        assert!(root.is_category());
        assert_eq!(root.children().unwrap().len(), 0);
    }

    #[test]
    fn test_get_address_not_found() {
        let mut store = CatalogStore::new();
        store
            .add_category(&CatalogPathBuf::root(), "collector")
            .unwrap();

        let error = store
            .get(&CatalogPathBuf::from("collector/files/notes"))
            .err()
            .expect("Should be err");
        match error.error {
            InnerError::AddressNotFound { missing, .. } => assert_eq!(missing, "files"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_key() {
        let mut store = CatalogStore::new();

        let error = store
            .add_category(&CatalogPathBuf::root(), "")
            .err()
            .expect("Should be err");
        assert!(matches!(error.error, InnerError::MalformedAddress(_)));

        let category = store
            .add_category(&CatalogPathBuf::root(), "files")
            .unwrap();
        let error = store
            .add_leaf(&category, "a/b", TestHandler::boxed("a/b"))
            .err()
            .expect("Should be err");
        assert!(matches!(error.error, InnerError::MalformedAddress(_)));
    }

    #[test]
    fn test_to_json() {
        let mut store = CatalogStore::new();
        let category = store
            .add_category(&CatalogPathBuf::root(), "files")
            .unwrap();
        store
            .add_leaf(&category, "wallpaper", TestHandler::boxed("wallpaper"))
            .unwrap();

        assert_eq!(
            store.to_json(),
            serde_json::json!({
                "files": {
                    "wallpaper": { "type": "Test", "property": "wallpaper" }
                }
            })
        );
    }
}
