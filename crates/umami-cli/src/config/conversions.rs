use crate::cli::{
    BuildArgs, CacheKeyArg, CommunityArg, CorpusArgs, InspectArgs, InspectQuery, RecommendArgs,
    StrategyArg,
};
use crate::config::ConfigOverrides;
use umami_graph::{DetectorKind, KeyStrategy, Strategy};

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Adjacency => Strategy::Adjacency,
            StrategyArg::Cooccurring => Strategy::Cooccurring,
        }
    }
}

impl From<CommunityArg> for DetectorKind {
    fn from(arg: CommunityArg) -> Self {
        match arg {
            CommunityArg::Greedy => DetectorKind::Greedy,
            CommunityArg::Louvain => DetectorKind::Louvain,
        }
    }
}

impl From<CacheKeyArg> for KeyStrategy {
    fn from(arg: CacheKeyArg) -> Self {
        match arg {
            CacheKeyArg::Size => KeyStrategy::CorpusSize,
            CacheKeyArg::Content => KeyStrategy::Content,
        }
    }
}

impl From<&CorpusArgs> for ConfigOverrides {
    fn from(args: &CorpusArgs) -> Self {
        Self {
            source: args.source.clone(),
            corpus_size: args.recipes,
            cache_key: args.cache_key.map(Into::into),
            ..Self::default()
        }
    }
}

impl From<&BuildArgs> for ConfigOverrides {
    fn from(args: &BuildArgs) -> Self {
        Self {
            // --force only ever turns rebuilding on
            force_rebuild: args.force.then_some(true),
            ..Self::from(&args.corpus)
        }
    }
}

impl From<&RecommendArgs> for ConfigOverrides {
    fn from(args: &RecommendArgs) -> Self {
        Self {
            strategy: args.strategy.map(Into::into),
            community: args.community.map(Into::into),
            ..Self::from(&args.corpus)
        }
    }
}

impl From<&InspectArgs> for ConfigOverrides {
    fn from(args: &InspectArgs) -> Self {
        let community = match args.query {
            InspectQuery::Communities { community, .. } => community.map(Into::into),
            _ => None,
        };
        Self {
            community,
            ..Self::from(&args.corpus)
        }
    }
}
