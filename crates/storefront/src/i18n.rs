//! UI strings for each locale.
//!
//! Product and category text comes from the database in both languages;
//! everything else a page shows comes from here.

use elegant_core::Locale;

/// Every UI string a page can show, in one language.
#[derive(Debug)]
pub struct Messages {
    pub store_name: &'static str,
    pub announcement: &'static str,
    pub language_name: &'static str,

    pub nav_home: &'static str,
    pub nav_products: &'static str,
    pub nav_categories: &'static str,
    pub nav_about: &'static str,
    pub nav_contact: &'static str,
    pub nav_cart: &'static str,
    pub nav_account: &'static str,
    pub nav_admin: &'static str,
    pub nav_login: &'static str,
    pub nav_register: &'static str,
    pub nav_logout: &'static str,
    pub search: &'static str,

    pub hero_title: &'static str,
    pub hero_subtitle: &'static str,
    pub shop_now: &'static str,
    pub shop_by_category: &'static str,
    pub featured_products: &'static str,
    pub view_all_products: &'static str,
    pub offers_title: &'static str,
    pub offers_text: &'static str,

    pub all_products: &'static str,
    pub filters: &'static str,
    pub category: &'static str,
    pub all_categories: &'static str,
    pub price: &'static str,
    pub price_all: &'static str,
    pub price_under_100: &'static str,
    pub price_100_300: &'static str,
    pub price_over_300: &'static str,
    pub sort_by: &'static str,
    pub sort_featured: &'static str,
    pub sort_price_low: &'static str,
    pub sort_price_high: &'static str,
    pub sort_name: &'static str,
    pub apply: &'static str,
    pub products_found: &'static str,
    pub no_products: &'static str,
    pub products_count: &'static str,

    pub size: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub in_stock: &'static str,
    pub out_of_stock: &'static str,
    pub add_to_cart: &'static str,
    pub related_products: &'static str,
    pub login_to_shop: &'static str,

    pub cart_title: &'static str,
    pub cart_empty: &'static str,
    pub cart_empty_message: &'static str,
    pub continue_shopping: &'static str,
    pub quantity: &'static str,
    pub update: &'static str,
    pub remove: &'static str,
    pub order_summary: &'static str,
    pub subtotal: &'static str,
    pub shipping: &'static str,
    pub total: &'static str,
    pub proceed_to_checkout: &'static str,
    pub added_to_cart: &'static str,

    pub checkout_title: &'static str,
    pub shipping_address: &'static str,
    pub payment_method: &'static str,
    pub cash_on_delivery: &'static str,
    pub bank_transfer: &'static str,
    pub guest_checkout: &'static str,
    pub member_checkout: &'static str,
    pub address: &'static str,
    pub city: &'static str,
    pub postal_code: &'static str,
    pub place_order: &'static str,
    pub order_placed: &'static str,

    pub first_name: &'static str,
    pub last_name: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
    pub password: &'static str,
    pub confirm_password: &'static str,
    pub login_title: &'static str,
    pub register_title: &'static str,
    pub create_account: &'static str,
    pub dont_have_account: &'static str,
    pub already_have_account: &'static str,
    pub personalized_shopping: &'static str,

    pub account_title: &'static str,
    pub welcome: &'static str,
    pub orders_title: &'static str,
    pub profile_title: &'static str,
    pub no_orders: &'static str,
    pub order: &'static str,
    pub date: &'static str,
    pub status: &'static str,
    pub items: &'static str,
    pub save: &'static str,
    pub profile_saved: &'static str,

    pub admin_dashboard: &'static str,
    pub admin_products: &'static str,
    pub admin_categories: &'static str,
    pub admin_orders: &'static str,
    pub featured: &'static str,

    pub about_title: &'static str,
    pub about_body: &'static str,
    pub contact_title: &'static str,
    pub contact_body: &'static str,
    pub contact_email: &'static str,
    pub contact_phone: &'static str,
    pub footer_tagline: &'static str,
    pub footer_rights: &'static str,
    pub not_found: &'static str,

    /// Messages for `?error=` codes.
    errors: &'static [(&'static str, &'static str)],
    pub error_generic: &'static str,
}

impl Messages {
    /// Strings for `locale`.
    #[must_use]
    pub fn for_locale(locale: Locale) -> &'static Self {
        match locale {
            Locale::En => &EN,
            Locale::Ar => &AR,
        }
    }

    /// The message for an error code carried in a redirect.
    #[must_use]
    pub fn error(&self, code: &str) -> &'static str {
        self.errors
            .iter()
            .find(|(c, _)| *c == code)
            .map_or(self.error_generic, |(_, message)| message)
    }
}

static EN: Messages = Messages {
    store_name: "Elegant",
    announcement: "Free returns within 14 days on all orders",
    language_name: "English",

    nav_home: "Home",
    nav_products: "Products",
    nav_categories: "Categories",
    nav_about: "About",
    nav_contact: "Contact",
    nav_cart: "Cart",
    nav_account: "My Account",
    nav_admin: "Admin",
    nav_login: "Login",
    nav_register: "Register",
    nav_logout: "Logout",
    search: "Search",

    hero_title: "Modest Fashion, Elegantly Crafted",
    hero_subtitle: "Discover hijabs, abayas and dresses made for everyday grace",
    shop_now: "Shop Now",
    shop_by_category: "Shop by Category",
    featured_products: "Featured Products",
    view_all_products: "View All Products",
    offers_title: "Special Offers",
    offers_text: "New arrivals every week, with flat-rate shipping across the Kingdom",

    all_products: "All Products",
    filters: "Filters",
    category: "Category",
    all_categories: "All Categories",
    price: "Price",
    price_all: "All Prices",
    price_under_100: "Under 100 SAR",
    price_100_300: "100 - 300 SAR",
    price_over_300: "Over 300 SAR",
    sort_by: "Sort by",
    sort_featured: "Featured",
    sort_price_low: "Price: Low to High",
    sort_price_high: "Price: High to Low",
    sort_name: "Name",
    apply: "Apply",
    products_found: "products found",
    no_products: "No products match your filters.",
    products_count: "products",

    size: "Size",
    color: "Color",
    description: "Description",
    in_stock: "In Stock",
    out_of_stock: "Out of Stock",
    add_to_cart: "Add to Cart",
    related_products: "Related Products",
    login_to_shop: "Log in to add items to your cart",

    cart_title: "Shopping Cart",
    cart_empty: "Your cart is empty",
    cart_empty_message: "Browse our collection and add something you love.",
    continue_shopping: "Continue Shopping",
    quantity: "Quantity",
    update: "Update",
    remove: "Remove",
    order_summary: "Order Summary",
    subtotal: "Subtotal",
    shipping: "Shipping",
    total: "Total",
    proceed_to_checkout: "Proceed to Checkout",
    added_to_cart: "Added to your cart",

    checkout_title: "Checkout",
    shipping_address: "Shipping Address",
    payment_method: "Payment Method",
    cash_on_delivery: "Cash on Delivery",
    bank_transfer: "Bank Transfer",
    guest_checkout: "Guest Checkout",
    member_checkout: "Member Checkout",
    address: "Address",
    city: "City",
    postal_code: "Postal Code",
    place_order: "Place Order",
    order_placed: "Thank you! Your order has been placed.",

    first_name: "First Name",
    last_name: "Last Name",
    email: "Email",
    phone: "Phone",
    password: "Password",
    confirm_password: "Confirm Password",
    login_title: "Sign in to your account",
    register_title: "Create your account",
    create_account: "Create Account",
    dont_have_account: "Don't have an account?",
    already_have_account: "Already have an account?",
    personalized_shopping: "Save your cart and track your orders",

    account_title: "My Account",
    welcome: "Welcome",
    orders_title: "My Orders",
    profile_title: "Profile",
    no_orders: "You have not placed any orders yet.",
    order: "Order",
    date: "Date",
    status: "Status",
    items: "Items",
    save: "Save",
    profile_saved: "Your profile has been updated.",

    admin_dashboard: "Admin Dashboard",
    admin_products: "Products",
    admin_categories: "Categories",
    admin_orders: "Orders",
    featured: "Featured",

    about_title: "About Elegant",
    about_body: "Elegant brings together modest fashion pieces chosen for quality fabric, \
                 careful tailoring and timeless style. Every hijab, niqab, abaya and dress \
                 in our catalog is selected to be worn with confidence.",
    contact_title: "Contact Us",
    contact_body: "Questions about an order or a product? Our team replies within one business day.",
    contact_email: "support@elegant.sa",
    contact_phone: "+966 11 000 0000",
    footer_tagline: "Modest fashion for every occasion",
    footer_rights: "All rights reserved.",
    not_found: "Page not found",

    errors: &[
        ("invalid_credentials", "Invalid email or password."),
        ("email_taken", "An account with this email already exists."),
        ("invalid_email", "Please enter a valid email address."),
        ("weak_password", "Password must be at least 8 characters."),
        ("password_mismatch", "Passwords do not match."),
        ("missing_fields", "Please fill in all required fields."),
        ("product_not_found", "That product is no longer available."),
        ("out_of_stock", "That product is out of stock."),
        ("invalid_size", "Please choose an available size."),
        ("invalid_color", "Please choose an available color."),
        ("line_not_found", "That item is no longer in your cart."),
        ("empty_cart", "Your cart is empty."),
        ("rate_limited", "Too many attempts. Please wait a minute and try again."),
    ],
    error_generic: "Something went wrong. Please try again.",
};

static AR: Messages = Messages {
    store_name: "أناقة",
    announcement: "إرجاع مجاني خلال 14 يوماً على جميع الطلبات",
    language_name: "العربية",

    nav_home: "الرئيسية",
    nav_products: "المنتجات",
    nav_categories: "الفئات",
    nav_about: "من نحن",
    nav_contact: "اتصل بنا",
    nav_cart: "السلة",
    nav_account: "حسابي",
    nav_admin: "الإدارة",
    nav_login: "تسجيل الدخول",
    nav_register: "إنشاء حساب",
    nav_logout: "تسجيل الخروج",
    search: "بحث",

    hero_title: "أزياء محتشمة بلمسة أنيقة",
    hero_subtitle: "اكتشفي الحجاب والعباءات والفساتين المصممة لأناقة كل يوم",
    shop_now: "تسوقي الآن",
    shop_by_category: "تسوقي حسب الفئة",
    featured_products: "منتجات مميزة",
    view_all_products: "عرض جميع المنتجات",
    offers_title: "عروض خاصة",
    offers_text: "وصول جديد كل أسبوع مع شحن بسعر ثابت إلى جميع أنحاء المملكة",

    all_products: "جميع المنتجات",
    filters: "التصفية",
    category: "الفئة",
    all_categories: "جميع الفئات",
    price: "السعر",
    price_all: "جميع الأسعار",
    price_under_100: "أقل من 100 ريال",
    price_100_300: "100 - 300 ريال",
    price_over_300: "أكثر من 300 ريال",
    sort_by: "ترتيب حسب",
    sort_featured: "المميزة",
    sort_price_low: "السعر: من الأقل إلى الأعلى",
    sort_price_high: "السعر: من الأعلى إلى الأقل",
    sort_name: "الاسم",
    apply: "تطبيق",
    products_found: "منتج",
    no_products: "لا توجد منتجات مطابقة.",
    products_count: "منتج",

    size: "المقاس",
    color: "اللون",
    description: "الوصف",
    in_stock: "متوفر",
    out_of_stock: "غير متوفر",
    add_to_cart: "أضف إلى السلة",
    related_products: "منتجات ذات صلة",
    login_to_shop: "سجلي الدخول لإضافة المنتجات إلى السلة",

    cart_title: "سلة التسوق",
    cart_empty: "سلتك فارغة",
    cart_empty_message: "تصفحي مجموعتنا وأضيفي ما يعجبك.",
    continue_shopping: "متابعة التسوق",
    quantity: "الكمية",
    update: "تحديث",
    remove: "إزالة",
    order_summary: "ملخص الطلب",
    subtotal: "المجموع الفرعي",
    shipping: "الشحن",
    total: "المجموع",
    proceed_to_checkout: "إتمام الشراء",
    added_to_cart: "تمت الإضافة إلى السلة",

    checkout_title: "إتمام الطلب",
    shipping_address: "عنوان الشحن",
    payment_method: "طريقة الدفع",
    cash_on_delivery: "الدفع عند الاستلام",
    bank_transfer: "تحويل بنكي",
    guest_checkout: "الشراء كضيف",
    member_checkout: "الشراء كعضو",
    address: "العنوان",
    city: "المدينة",
    postal_code: "الرمز البريدي",
    place_order: "تأكيد الطلب",
    order_placed: "شكراً لك! تم تأكيد طلبك.",

    first_name: "الاسم الأول",
    last_name: "اسم العائلة",
    email: "البريد الإلكتروني",
    phone: "رقم الجوال",
    password: "كلمة المرور",
    confirm_password: "تأكيد كلمة المرور",
    login_title: "تسجيل الدخول إلى حسابك",
    register_title: "إنشاء حساب جديد",
    create_account: "إنشاء حساب",
    dont_have_account: "ليس لديك حساب؟",
    already_have_account: "لديك حساب بالفعل؟",
    personalized_shopping: "احفظي سلتك وتابعي طلباتك",

    account_title: "حسابي",
    welcome: "مرحباً",
    orders_title: "طلباتي",
    profile_title: "الملف الشخصي",
    no_orders: "لم تقومي بأي طلب بعد.",
    order: "الطلب",
    date: "التاريخ",
    status: "الحالة",
    items: "القطع",
    save: "حفظ",
    profile_saved: "تم تحديث ملفك الشخصي.",

    admin_dashboard: "لوحة التحكم",
    admin_products: "المنتجات",
    admin_categories: "الفئات",
    admin_orders: "الطلبات",
    featured: "مميز",

    about_title: "عن أناقة",
    about_body: "تجمع أناقة قطع الأزياء المحتشمة المختارة بعناية لجودة القماش ودقة الخياطة \
                 والطابع الكلاسيكي. كل حجاب ونقاب وعباءة وفستان في متجرنا مختار ليُلبس بثقة.",
    contact_title: "اتصل بنا",
    contact_body: "لديك سؤال عن طلب أو منتج؟ يرد فريقنا خلال يوم عمل واحد.",
    contact_email: "support@elegant.sa",
    contact_phone: "+966 11 000 0000",
    footer_tagline: "أزياء محتشمة لكل مناسبة",
    footer_rights: "جميع الحقوق محفوظة.",
    not_found: "الصفحة غير موجودة",

    errors: &[
        ("invalid_credentials", "البريد الإلكتروني أو كلمة المرور غير صحيحة."),
        ("email_taken", "يوجد حساب مسجل بهذا البريد الإلكتروني."),
        ("invalid_email", "يرجى إدخال بريد إلكتروني صحيح."),
        ("weak_password", "يجب أن تتكون كلمة المرور من 8 أحرف على الأقل."),
        ("password_mismatch", "كلمتا المرور غير متطابقتين."),
        ("missing_fields", "يرجى تعبئة جميع الحقول المطلوبة."),
        ("product_not_found", "هذا المنتج لم يعد متوفراً."),
        ("out_of_stock", "هذا المنتج غير متوفر حالياً."),
        ("invalid_size", "يرجى اختيار مقاس متوفر."),
        ("invalid_color", "يرجى اختيار لون متوفر."),
        ("line_not_found", "هذا المنتج لم يعد في سلتك."),
        ("empty_cart", "سلتك فارغة."),
        ("rate_limited", "محاولات كثيرة. يرجى الانتظار دقيقة ثم المحاولة مجدداً."),
    ],
    error_generic: "حدث خطأ ما. يرجى المحاولة مرة أخرى.",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_lookup() {
        let en = Messages::for_locale(Locale::En);
        assert_eq!(en.error("empty_cart"), "Your cart is empty.");
        assert_eq!(en.error("no_such_code"), en.error_generic);
    }

    #[test]
    fn test_locales_cover_same_error_codes() {
        let en: Vec<_> = EN.errors.iter().map(|(code, _)| *code).collect();
        let ar: Vec<_> = AR.errors.iter().map(|(code, _)| *code).collect();
        assert_eq!(en, ar);
    }

    #[test]
    fn test_arabic_store_name() {
        assert_eq!(Messages::for_locale(Locale::Ar).store_name, "أناقة");
    }
}
