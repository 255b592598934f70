/// Partitions of tile work the scheduler knows about.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TileGroup {
    /// Building tile objects (geometry, textures) from decoded data.
    Create,
    /// Fetching tile payloads and decoding them.
    FetchAndDecode,
}

impl TileGroup {
    /// Service order within a tick.
    ///
    /// Creation runs first: it turns into visible results immediately, and
    /// the data it consumes has already cost fetch and decode time. Fetched
    /// data can tolerate a frame of delay and may expire before use anyway.
    pub const SERVICE_ORDER: [TileGroup; 2] = [TileGroup::Create, TileGroup::FetchAndDecode];
}
