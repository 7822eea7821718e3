use super::*;

/// Bedroom count implied by an apartment type code.
pub(crate) fn bedrooms_for_type(apartment_type: &str) -> Option<u8> {
    match apartment_type {
        "studio" => Some(0),
        "1br" => Some(1),
        "2br" => Some(2),
        "3br" | "penthouse" => Some(3),
        _ => None,
    }
}

impl Page {
    pub(crate) fn install_bedroom_autofill(&mut self) -> Result<()> {
        if let Some(fields) = TypeFields::resolve(&self.dom)? {
            self.add_listener(
                ListenerTarget::Node(fields.apartment_type),
                "change",
                Handler::FillBedrooms(fields),
            );
        }
        Ok(())
    }

    pub(crate) fn fill_bedrooms(&mut self, fields: TypeFields) -> Result<()> {
        let apartment_type = self.dom.value(fields.apartment_type)?;
        if let Some(bedrooms) = bedrooms_for_type(&apartment_type) {
            self.dom.set_value(fields.bedrooms, &bedrooms.to_string())?;
        }
        Ok(())
    }
}
