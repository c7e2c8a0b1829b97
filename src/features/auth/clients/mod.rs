mod member_client;

pub use member_client::{HttpMemberDirectory, InMemoryMemberDirectory, MemberDirectory};
