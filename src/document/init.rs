use std::borrow::Cow;

use typed_builder::TypedBuilder;

use pakform_types::PackagingDescriptor;

#[non_exhaustive]
#[derive(Debug, Clone, TypedBuilder)]
pub struct Request<'a> {
    pub name: Cow<'a, str>,
    pub bundle_id: Cow<'a, str>,
    pub version: Cow<'a, str>,
}

#[non_exhaustive]
#[derive(Debug, Clone, Default, TypedBuilder)]
pub struct PartialRequest<'a> {
    #[builder(default)]
    pub name: Option<&'a str>,
    #[builder(default)]
    pub bundle_id: Option<&'a str>,
    #[builder(default)]
    pub version: Option<&'a str>,
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Invalid input")]
    InvalidInput,
}

#[cfg(feature = "cli")]
impl<'a> crate::Request for Request<'a> {
    type Error = RequestError;
    type Partial = PartialRequest<'a>;

    fn new_from_user_input(partial: Self::Partial) -> Result<Self, Self::Error> {
        use dialoguer::Input;

        let name = match partial.name {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(
                Input::<String>::new()
                    .with_prompt("Package name")
                    .interact()
                    .map_err(|_| RequestError::InvalidInput)?,
            ),
        };

        let bundle_id = match partial.bundle_id {
            Some(bundle_id) => Cow::Borrowed(bundle_id),
            None => Cow::Owned(
                Input::<String>::new()
                    .with_prompt("Bundle identifier")
                    .allow_empty(true)
                    .interact()
                    .map_err(|_| RequestError::InvalidInput)?,
            ),
        };

        let version = match partial.version {
            Some(version) => Cow::Borrowed(version),
            None => Cow::Owned(
                Input::<String>::new()
                    .with_prompt("Version")
                    .default("1.0.0".into())
                    .interact()
                    .map_err(|_| RequestError::InvalidInput)?,
            ),
        };

        Ok(Request {
            name,
            bundle_id,
            version,
        })
    }
}

/// Builds the canonical starting document with the requested identity
/// fields filled in.
pub fn init<'a>(request: Request<'a>) -> PackagingDescriptor {
    let mut document = PackagingDescriptor::default();
    document.name = request.name.into_owned();
    document.bundle_id = request.bundle_id.into_owned();
    document.version = request.version.into_owned();
    document
}
