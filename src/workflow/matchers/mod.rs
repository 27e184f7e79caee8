pub use prefix::PrefixMatcher;

mod prefix;
