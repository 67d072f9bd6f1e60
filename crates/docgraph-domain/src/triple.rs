//! Triple module - the statements the remote service extracts from a document

/// A subject-relation-object statement.
///
/// Triples are produced by the remote service and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Triple {
    /// Subject entity (becomes a node id)
    pub subject: String,

    /// Relation between subject and object (becomes the edge label)
    pub relation: String,

    /// Object entity (becomes a node id)
    pub object: String,

    /// Excerpt of the document the triple was extracted from, if provided
    pub source: Option<String>,
}

impl Triple {
    /// Create a triple without a source excerpt
    ///
    /// # Examples
    ///
    /// ```
    /// use docgraph_domain::Triple;
    ///
    /// let t = Triple::new("Alice", "knows", "Bob");
    /// assert_eq!(t.relation, "knows");
    /// assert!(t.source.is_none());
    /// ```
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
            source: None,
        }
    }

    /// Attach the source excerpt
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Assignment of a node to a cluster.
///
/// One entry per distinct node. Cluster ids only drive coloring.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterAssignment {
    /// Node identifier (a subject or object value)
    pub node_id: String,

    /// Cluster the node belongs to
    pub cluster_id: u32,
}

impl ClusterAssignment {
    /// Create a new assignment
    pub fn new(node_id: impl Into<String>, cluster_id: u32) -> Self {
        Self {
            node_id: node_id.into(),
            cluster_id,
        }
    }
}
