use std::fmt;

/// Coarse milestones of a retrieval, reported in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RetrievalStage {
    /// The search area is known; no request has been sent yet.
    AreaComputed,
    /// Daily summaries and normals have been looked up.
    DataRetrieved,
    Done,
}

impl RetrievalStage {
    /// Share of the work done when this stage is reached.
    pub fn percent(&self) -> u8 {
        match self {
            RetrievalStage::AreaComputed => 25,
            RetrievalStage::DataRetrieved => 75,
            RetrievalStage::Done => 100,
        }
    }
}

impl fmt::Display for RetrievalStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RetrievalStage::AreaComputed => "search area computed",
            RetrievalStage::DataRetrieved => "weather data retrieved",
            RetrievalStage::Done => "done",
        };
        write!(f, "{} ({}%)", name, self.percent())
    }
}

/// Observer notified of each [`RetrievalStage`].
pub type ProgressCallback<'a> = &'a (dyn Fn(RetrievalStage) + Send + Sync);
