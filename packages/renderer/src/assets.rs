use rsvpkit_model::AssetRef;

/// Turns a theme image reference into something displayable.
///
/// Implemented by the asset collaborator; the renderer only asks for a
/// reference string and never stores anything.
pub trait AssetResolver {
    fn resolve(&self, asset: &AssetRef) -> Option<String>;
}

/// Passes URLs through and addresses uploads as `asset://{handle}`
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAssets;

impl AssetResolver for DefaultAssets {
    fn resolve(&self, asset: &AssetRef) -> Option<String> {
        match asset {
            AssetRef::Url(url) if url.trim().is_empty() => None,
            AssetRef::Url(url) => Some(url.clone()),
            AssetRef::Upload { handle } => Some(format!("asset://{}", handle)),
        }
    }
}
