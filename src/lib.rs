pub mod params;
pub mod reduce;
pub mod zetas;
pub mod poly;
pub mod ntt;
pub mod invntt;
pub mod basemul;
pub mod codec;
pub mod compress;
pub mod message;
pub mod cbd;
pub mod error;
