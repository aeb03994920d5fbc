//! Wire shapes for the UGC posts and asset upload endpoints.
//
//  Field names follow LinkedIn's Rest.li conventions, including the
//  fully-qualified union keys.

use serde::{Deserialize, Serialize};

pub const LIFECYCLE_PUBLISHED: &str = "PUBLISHED";
pub const MEDIA_CATEGORY_NONE: &str = "NONE";
pub const MEDIA_CATEGORY_IMAGE: &str = "IMAGE";
pub const VISIBILITY_PUBLIC: &str = "PUBLIC";
pub const MEDIA_STATUS_READY: &str = "READY";
pub const FEEDSHARE_RECIPE: &str = "urn:li:digitalmediaRecipe:feedshare-image";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UgcPost {
    pub author: String,
    pub lifecycle_state: &'static str,
    pub specific_content: SpecificContent,
    pub visibility: Visibility,
}

#[derive(Debug, Serialize)]
pub struct SpecificContent {
    #[serde(rename = "com.linkedin.ugc.ShareContent")]
    pub share_content: ShareContent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareContent {
    pub share_commentary: Text,
    pub share_media_category: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaEntry>,
}

#[derive(Debug, Serialize)]
pub struct Text {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaEntry {
    pub status: &'static str,
    pub description: Text,
    pub media: String,
    pub title: Text,
}

#[derive(Debug, Serialize)]
pub struct Visibility {
    #[serde(rename = "com.linkedin.ugc.MemberNetworkVisibility")]
    pub member_network: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUploadRequest {
    pub register_upload_request: RegisterUpload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUpload {
    pub recipes: Vec<&'static str>,
    pub owner: String,
    pub service_relationships: Vec<ServiceRelationship>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRelationship {
    pub relationship_type: &'static str,
    pub identifier: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct RegisterUploadResponse {
    pub value: UploadValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadValue {
    pub asset: String,
    pub upload_mechanism: UploadMechanism,
}

#[derive(Debug, Deserialize)]
pub struct UploadMechanism {
    #[serde(rename = "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest")]
    pub request: UploadHttpRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadHttpRequest {
    pub upload_url: String,
}

/// OpenID Connect userinfo; `sub` is the member id used in author URNs.
#[derive(Debug, Deserialize)]
pub struct UserInfo {
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
}
