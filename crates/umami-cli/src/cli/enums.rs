use clap::ValueEnum;

/// Ranking strategy for recommendations
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum StrategyArg {
    /// Sum of edge weights to the seeds, scaled by centrality
    #[value(name = "adjacency")]
    Adjacency,

    /// Common neighbours of seed pairs, scaled by centrality
    #[value(name = "cooccurring")]
    Cooccurring,
}

/// Community detection algorithm
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum CommunityArg {
    /// Greedy modularity agglomeration
    #[value(name = "greedy")]
    Greedy,

    /// Louvain local moving
    #[value(name = "louvain")]
    Louvain,
}

/// Cache key derivation
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum CacheKeyArg {
    /// Corpus size only
    #[value(name = "size")]
    Size,

    /// Corpus size plus a fingerprint of the source contents
    #[value(name = "content")]
    Content,
}

/// Graph export format
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ExportFormat {
    /// Nodes and weighted edge list as JSON
    #[value(name = "json")]
    Json,

    /// Graphviz DOT
    #[value(name = "dot")]
    Dot,
}
