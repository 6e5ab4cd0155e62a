use std::borrow::Cow;

/// Serializes fields as `application/x-www-form-urlencoded`, encoding spaces as `+`.
pub(crate) fn encode_form_fields(fields: &[(Cow<'static, str>, Cow<'static, str>)]) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.extend_pairs(fields.iter().map(|(k, v)| (&**k, &**v)));
    serializer.finish()
}
