pub mod depth;
pub mod phong;
