//! GraphQL query documents issued by the engine.
//!
//! These are the only shapes the engine ever sends: the three repository
//! collections plus the secondary lookups used to resolve fork owners.
//! Nested organization memberships are capped at a single page of 100; the
//! `totalCount` is recorded so truncation stays visible.

/// Watchers of a repository, one page per request.
pub const WATCHERS: &str = r#"
query($owner: String!, $name: String!, $count: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    watchers(first: $count, after: $after) {
      totalCount
      edges {
        node {
          login
          name
          company
          websiteUrl
          url
          organizations(first: 100) {
            totalCount
            edges {
              node {
                login
                name
                description
                websiteUrl
              }
            }
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}"#;

/// Stargazers of a repository; the star timestamp lives on the edge.
pub const STARGAZERS: &str = r#"
query($owner: String!, $name: String!, $count: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    stargazers(first: $count, after: $after) {
      totalCount
      edges {
        starredAt
        node {
          login
          name
          company
          websiteUrl
          url
          organizations(first: 100) {
            totalCount
            edges {
              node {
                login
                name
                description
                websiteUrl
              }
            }
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}"#;

/// Forks of a repository. Only the owning login is available here; profiles
/// are resolved separately because the owner may be a user or an org.
pub const FORKS: &str = r#"
query($owner: String!, $name: String!, $count: Int!, $after: String) {
  repository(owner: $owner, name: $name) {
    forks(first: $count, after: $after) {
      totalCount
      edges {
        node {
          createdAt
          owner {
            login
          }
        }
      }
      pageInfo {
        hasNextPage
        endCursor
      }
    }
  }
}"#;

/// Classifies a login as a user or an organization.
pub const OWNER_TYPE: &str = r#"
query($login: String!) {
  repositoryOwner(login: $login) {
    __typename
  }
}"#;

/// Profile and public org memberships for a user login.
pub const USER_PROFILE: &str = r#"
query($login: String!) {
  user(login: $login) {
    login
    name
    company
    websiteUrl
    url
    organizations(first: 100) {
      totalCount
      edges {
        node {
          login
          name
          description
          websiteUrl
        }
      }
    }
  }
}"#;

/// Profile for an organization login.
pub const ORG_PROFILE: &str = r#"
query($login: String!) {
  organization(login: $login) {
    login
    name
    description
    websiteUrl
    url
  }
}"#;
