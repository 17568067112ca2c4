pub mod io;
pub mod mono;
pub mod phylo;
