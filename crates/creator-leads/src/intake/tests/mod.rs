mod common;
mod routing;
mod tiers;
mod validation;
