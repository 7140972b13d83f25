mod picsum;

pub use picsum::PicsumCatalogClient;
