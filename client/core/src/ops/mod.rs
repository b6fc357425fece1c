mod admin;
mod favorites;
mod files;
mod groups;
mod identity;
mod roles;
