//! User-facing strings, in the product's Turkish locale.

pub const PASSWORD_MISMATCH: &str = "Şifreler eşleşmiyor.";
pub const REGISTRATION_FAILED: &str = "Kayıt işlemi başarısız oldu. Lütfen tekrar deneyin.";

pub const LOGIN_FAILED: &str = "Giriş başarısız oldu. Lütfen tekrar deneyin.";

pub const IMAGE_REQUIRED: &str = "Lütfen bir resim seçin";
pub const UPLOAD_IN_PROGRESS: &str = "Yükleme devam ediyor, lütfen bekleyin.";
pub const SCREEN_CREATE_FAILED: &str = "Ekran eklenirken bir hata oluştu. Lütfen tekrar deneyin.";

pub const SUBMIT_LABEL: &str = "Ekle";
pub const UPLOADING_LABEL: &str = "Yükleniyor...";
